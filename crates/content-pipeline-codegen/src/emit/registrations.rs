//! Dependency-injection registrations

use super::writer::SourceWriter;
use super::{Emitter, SharedSource, global};
use content_pipeline_core::{ArtifactKind, ContentClass, WellKnownConverter};

impl Emitter {
    pub(super) fn registrations(&self, classes: &[ContentClass]) -> Vec<SharedSource> {
        vec![
            SharedSource::new(
                "PipelineStepsServiceCollectionExtensions",
                ArtifactKind::Registration,
                self.step_registrations(classes),
            ),
            SharedSource::new(
                "ContentPipelineServiceCollectionExtensions",
                ArtifactKind::Registration,
                self.service_registrations(),
            ),
        ]
    }

    fn registration_file(&self) -> SourceWriter {
        let interfaces = self.ns("Interfaces");
        let converters = self.ns("Converters");
        let services = self.ns("Services");
        let pipelines = self.ns("Pipelines");
        let mut w = SourceWriter::file();
        w.usings(&[
            "Microsoft.Extensions.DependencyInjection",
            interfaces.as_str(),
            converters.as_str(),
            pipelines.as_str(),
            services.as_str(),
        ])
        .blank()
        .namespace(&self.ns("ServiceCollectionExtensions"));
        w
    }

    /// One step registration per class, in resolution order
    fn step_registrations(&self, classes: &[ContentClass]) -> String {
        let mut w = self.registration_file();
        w.open("public static class PipelineStepsServiceCollectionExtensions")
            .open("public static IServiceCollection AddContentPipelineGeneratedSteps(this IServiceCollection services)");

        if classes.is_empty() {
            w.line("return services;");
        } else {
            w.line("return services").indent();
            for (index, class) in classes.iter().enumerate() {
                let terminator = if index + 1 == classes.len() { ";" } else { "" };
                w.line(&format!(
                    ".AddSingleton<IContentPipelineStep<{}, {}>, {}>(){terminator}",
                    global(&class.fully_qualified_name),
                    global(&self.model_type(class)),
                    global(&self.step_type(class)),
                ));
            }
            w.dedent();
        }

        w.close().close();
        w.finish()
    }

    fn service_registrations(&self) -> String {
        let mut w = self.registration_file();
        w.open("public static class ContentPipelineServiceCollectionExtensions")
            .open("public static IServiceCollection AddContentPipelineServices(this IServiceCollection services)")
            .line("return services")
            .indent()
            .line(".AddContentPipelineGeneratedSteps()")
            .line(".AddTransient<IXhtmlRenderService, XhtmlRenderService>()")
            .line(".AddSingleton<IContentPipelineService, ContentPipelineService>()");
        for converter in WellKnownConverter::ALL {
            w.line(&format!(
                ".AddSingleton<{}, {}>()",
                converter.contract_name(),
                converter.implementation_name()
            ));
        }
        w.line(".AddSingleton(typeof(IEnumConverter<>), typeof(EnumConverter<>))")
            .line(".AddSingleton(typeof(IContentPipeline<,>), typeof(DefaultContentPipeline<,>));")
            .dedent()
            .close()
            .close();
        w.finish()
    }
}
