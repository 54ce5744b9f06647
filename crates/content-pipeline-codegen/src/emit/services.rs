//! Pipeline service, its entities and XHTML rendering

use super::writer::SourceWriter;
use super::{Emitter, SharedSource, global};
use crate::naming::{lower_first, pipeline_member_names};
use content_pipeline_core::{ArtifactKind, ContentClass};

impl Emitter {
    pub(super) fn services(&self, classes: &[ContentClass]) -> Vec<SharedSource> {
        vec![
            SharedSource::new("PipelineArgs", ArtifactKind::Service, self.pipeline_args()),
            SharedSource::new(
                "ContentPipelineContext",
                ArtifactKind::Service,
                self.pipeline_context(),
            ),
            SharedSource::new(
                "BaseContentPipelineService",
                ArtifactKind::Service,
                self.base_service(),
            ),
            SharedSource::new(
                "ContentPipelineService",
                ArtifactKind::Service,
                self.pipeline_service(classes),
            ),
            SharedSource::new(
                "XhtmlRenderService",
                ArtifactKind::Service,
                self.xhtml_render_service(),
            ),
        ]
    }

    fn entity_file(&self) -> SourceWriter {
        let interfaces = self.ns("Interfaces");
        let mut w = SourceWriter::file();
        w.usings(&[
            "System.Globalization",
            "EPiServer.Core",
            "Microsoft.AspNetCore.Http",
            interfaces.as_str(),
        ])
        .blank()
        .namespace(&self.ns("Entities"));
        w
    }

    fn service_file(&self) -> SourceWriter {
        let interfaces = self.ns("Interfaces");
        let entities = self.ns("Entities");
        let models = self.ns("Models");
        let mut w = SourceWriter::file();
        w.usings(&[
            "System.Threading.Tasks",
            "EPiServer",
            "EPiServer.Core",
            interfaces.as_str(),
            entities.as_str(),
            models.as_str(),
        ])
        .blank()
        .namespace(&self.ns("Services"));
        w
    }

    fn pipeline_args(&self) -> String {
        let mut w = self.entity_file();
        w.summary("Everything needed to run a pipeline from outside a step")
            .line("public record PipelineArgs(HttpContext HttpContext, IContentData? Content, CultureInfo? Language);");
        w.finish()
    }

    fn pipeline_context(&self) -> String {
        let mut w = self.entity_file();
        w.line("public record ContentPipelineContext(")
            .indent()
            .line("HttpContext HttpContext,")
            .line("IContentPipelineService ContentPipelineService,")
            .line("CultureInfo? Language) : IContentPipelineContext;")
            .dedent();
        w.finish()
    }

    fn base_service(&self) -> String {
        let mut w = self.service_file();
        w.open("public abstract class BaseContentPipelineService : IContentPipelineService")
            .line("public IContentPipelineModel? ExecutePipeline(IContentData? content, IContentPipelineContext pipelineContext) =>")
            .indent()
            .line("content is null ? null : RunPipelineForContent(content, pipelineContext);")
            .dedent()
            .blank()
            .line("public IContentPipelineModel? ExecutePipeline(PipelineArgs pipelineArgs) =>")
            .indent()
            .line("ExecutePipeline(pipelineArgs.Content, ContextFor(pipelineArgs));")
            .dedent()
            .blank()
            .open("public async Task<IContentPipelineModel?> ExecutePipelineAsync(IContentData? content, IContentPipelineContext pipelineContext)")
            .line("if (content is null)")
            .line("    return null;")
            .blank()
            .line("return await RunPipelineForContentAsync(content, pipelineContext);")
            .close()
            .blank()
            .line("public Task<IContentPipelineModel?> ExecutePipelineAsync(PipelineArgs pipelineArgs) =>")
            .indent()
            .line("ExecutePipelineAsync(pipelineArgs.Content, ContextFor(pipelineArgs));")
            .dedent()
            .blank()
            .line("protected abstract IContentPipelineModel RunPipelineForContent(IContentData content, IContentPipelineContext pipelineContext);")
            .blank()
            .line("protected abstract Task<IContentPipelineModel> RunPipelineForContentAsync(IContentData content, IContentPipelineContext pipelineContext);")
            .blank()
            .line("private IContentPipelineContext ContextFor(PipelineArgs pipelineArgs) =>")
            .indent()
            .line("new ContentPipelineContext(pipelineArgs.HttpContext, this, pipelineArgs.Language);")
            .dedent()
            .close();
        w.finish()
    }

    fn pipeline_service(&self, classes: &[ContentClass]) -> String {
        let members = pipeline_member_names(classes);
        let entries: Vec<_> = classes
            .iter()
            .zip(&members)
            .map(|(class, member)| {
                let content = global(&class.fully_qualified_name);
                let pipeline = format!("IContentPipeline<{content}, {}>", global(&self.model_type(class)));
                (content, pipeline, lower_first(member))
            })
            .collect();

        let mut w = self.service_file();
        w.summary("Dispatches content to the pipeline of its exact type")
            .open("public partial class ContentPipelineService : BaseContentPipelineService");

        for (_, pipeline, member) in &entries {
            w.line(&format!("private readonly {pipeline} _{member};"));
        }
        if !entries.is_empty() {
            w.blank();
        }

        if entries.is_empty() {
            w.open("public ContentPipelineService()").close();
        } else {
            w.line("public ContentPipelineService(").indent();
            for (index, (_, pipeline, member)) in entries.iter().enumerate() {
                let separator = if index + 1 == entries.len() { ")" } else { "," };
                w.line(&format!("{pipeline} {member}{separator}"));
            }
            w.dedent().open("");
            for (_, _, member) in &entries {
                w.line(&format!("_{member} = {member};"));
            }
            w.close();
        }

        w.blank()
            .open("protected override IContentPipelineModel RunPipelineForContent(IContentData content, IContentPipelineContext pipelineContext)");
        if !entries.is_empty() {
            w.line("var contentType = content.GetOriginalType();");
        }
        for (content, _, member) in &entries {
            w.line(&format!("if (contentType == typeof({content}))"))
                .line(&format!("    return _{member}.Run(({content})content, pipelineContext);"));
        }
        if !entries.is_empty() {
            w.blank();
        }
        w.line("return new ContentPipelineModel();").close();

        w.blank()
            .open("protected override Task<IContentPipelineModel> RunPipelineForContentAsync(IContentData content, IContentPipelineContext pipelineContext)");
        if !entries.is_empty() {
            w.line("var contentType = content.GetOriginalType();");
        }
        for (content, _, member) in &entries {
            w.line(&format!("if (contentType == typeof({content}))"))
                .line(&format!("    return Widen(_{member}.RunAsync(({content})content, pipelineContext));"));
        }
        if !entries.is_empty() {
            w.blank();
        }
        w.line("return Task.FromResult<IContentPipelineModel>(new ContentPipelineModel());")
            .close()
            .blank()
            .line("private static async Task<IContentPipelineModel> Widen<TPipelineModel>(Task<TPipelineModel> run)")
            .indent()
            .line("where TPipelineModel : IContentPipelineModel")
            .dedent()
            .open("")
            .line("return await run;")
            .close()
            .close();
        w.finish()
    }

    fn xhtml_render_service(&self) -> String {
        let interfaces = self.ns("Interfaces");
        let mut w = SourceWriter::file();
        w.usings(&["EPiServer.Core", "Microsoft.AspNetCore.Http", interfaces.as_str()])
            .blank()
            .namespace(&self.ns("Services"))
            .open("public class XhtmlRenderService : IXhtmlRenderService")
            .open("public virtual string RenderXhtmlString(HttpContext? context, XhtmlString? xhtmlString)")
            .line("if (xhtmlString is null)")
            .line("    return string.Empty;")
            .blank()
            .line("return xhtmlString.ToHtmlString();")
            .close()
            .close();
        w.finish()
    }
}
