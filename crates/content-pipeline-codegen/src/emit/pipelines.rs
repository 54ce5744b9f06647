//! Step base classes and the default pipeline

use super::writer::SourceWriter;
use super::{Emitter, SharedSource};
use content_pipeline_core::ArtifactKind;

impl Emitter {
    pub(super) fn pipelines(&self) -> Vec<SharedSource> {
        vec![
            SharedSource::new("ContentPipelineStep", ArtifactKind::Pipeline, self.sync_step_base()),
            SharedSource::new(
                "AsyncContentPipelineStep",
                ArtifactKind::Pipeline,
                self.async_step_base(),
            ),
            SharedSource::new(
                "DefaultContentPipeline",
                ArtifactKind::Pipeline,
                self.default_pipeline(),
            ),
        ]
    }

    fn pipeline_file<S: AsRef<str>>(&self, extra: &[S]) -> SourceWriter {
        let interfaces = self.ns("Interfaces");
        let mut w = SourceWriter::file();
        w.usings(&["System.Threading.Tasks", "EPiServer.Core"])
            .usings(extra)
            .usings(&[interfaces.as_str()])
            .blank()
            .namespace(&self.ns("Pipelines"));
        w
    }

    fn step_header(&self, w: &mut SourceWriter, name: &str) {
        w.line(&format!(
            "public abstract class {name}<TContent, TPipelineModel> : IContentPipelineStep<TContent, TPipelineModel>"
        ))
        .indent()
        .line("where TContent : IContentData")
        .line("where TPipelineModel : IContentPipelineModel")
        .dedent()
        .open("")
        .open(&format!("protected {name}(int order)"))
        .line("Order = order;")
        .close()
        .blank()
        .line("public int Order { get; }")
        .blank();
    }

    fn sync_step_base(&self) -> String {
        let mut w = self.pipeline_file::<&str>(&[]);
        w.summary("Base class of synchronous steps");
        self.step_header(&mut w, "ContentPipelineStep");
        w.line("public bool IsAsync => false;")
            .blank()
            .line("public abstract void Execute(TContent content, TPipelineModel contentPipelineModel, IContentPipelineContext pipelineContext);")
            .blank()
            .open("public Task ExecuteAsync(TContent content, TPipelineModel contentPipelineModel, IContentPipelineContext pipelineContext)")
            .line("Execute(content, contentPipelineModel, pipelineContext);")
            .line("return Task.CompletedTask;")
            .close()
            .close();
        w.finish()
    }

    fn async_step_base(&self) -> String {
        let mut w = self.pipeline_file::<&str>(&[]);
        w.summary("Base class of steps that do I/O");
        self.step_header(&mut w, "AsyncContentPipelineStep");
        w.line("public bool IsAsync => true;")
            .blank()
            .line("public abstract Task ExecuteAsync(TContent content, TPipelineModel contentPipelineModel, IContentPipelineContext pipelineContext);")
            .blank()
            .open("public void Execute(TContent content, TPipelineModel contentPipelineModel, IContentPipelineContext pipelineContext)")
            .line("ExecuteAsync(content, contentPipelineModel, pipelineContext).GetAwaiter().GetResult();")
            .close()
            .close();
        w.finish()
    }

    fn default_pipeline(&self) -> String {
        let models = self.ns("Models");
        let mut w = self.pipeline_file(&["System.Collections.Generic", "System.Linq", models.as_str()]);
        w.summary("Runs the shared steps, then the class steps, each in ascending order")
            .line("public class DefaultContentPipeline<TContent, TPipelineModel> : IContentPipeline<TContent, TPipelineModel>")
            .indent()
            .line("where TContent : IContentData")
            .line("where TPipelineModel : IContentPipelineModel, new()")
            .dedent()
            .open("")
            .line("private readonly IReadOnlyList<IContentPipelineStep<IContentData, ContentPipelineModel>> _sharedSteps;")
            .line("private readonly IReadOnlyList<IContentPipelineStep<TContent, TPipelineModel>> _steps;")
            .blank()
            .line("public DefaultContentPipeline(")
            .indent()
            .line("IEnumerable<IContentPipelineStep<IContentData, ContentPipelineModel>> sharedSteps,")
            .line("IEnumerable<IContentPipelineStep<TContent, TPipelineModel>> steps)")
            .dedent()
            .open("")
            .line("_sharedSteps = sharedSteps.OrderBy(step => step.Order).ToList();")
            .line("_steps = steps.OrderBy(step => step.Order).ToList();")
            .close()
            .blank()
            .open("public TPipelineModel Run(TContent content, IContentPipelineContext pipelineContext)")
            .line("var contentPipelineModel = new TPipelineModel();")
            .open("if (contentPipelineModel is ContentPipelineModel sharedModel)")
            .open("foreach (var step in _sharedSteps)")
            .line("step.Execute(content, sharedModel, pipelineContext);")
            .close()
            .close()
            .blank()
            .open("foreach (var step in _steps)")
            .line("step.Execute(content, contentPipelineModel, pipelineContext);")
            .close()
            .blank()
            .line("return contentPipelineModel;")
            .close()
            .blank()
            .open("public async Task<TPipelineModel> RunAsync(TContent content, IContentPipelineContext pipelineContext)")
            .line("var contentPipelineModel = new TPipelineModel();")
            .open("if (contentPipelineModel is ContentPipelineModel sharedModel)")
            .open("foreach (var step in _sharedSteps)")
            .line("await step.ExecuteAsync(content, sharedModel, pipelineContext);")
            .close()
            .close()
            .blank()
            .open("foreach (var step in _steps)")
            .line("await step.ExecuteAsync(content, contentPipelineModel, pipelineContext);")
            .close()
            .blank()
            .line("return contentPipelineModel;")
            .close()
            .close();
        w.finish()
    }
}
