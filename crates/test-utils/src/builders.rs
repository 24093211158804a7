#![allow(dead_code)]

use shipkit::config::{PipelineSection, ProjectFile, PublishSection, ServiceSection};

/// Builder for `ProjectFile` to simplify test setup.
pub struct ProjectFileBuilder {
    project: ProjectFile,
}

impl ProjectFileBuilder {
    pub fn new(service_name: &str) -> Self {
        Self {
            project: ProjectFile {
                service: ServiceSection {
                    name: service_name.to_string(),
                    artifact_dir: "dist".to_string(),
                },
                publish: PublishSection::default(),
                pipeline: PipelineSection::default(),
            },
        }
    }

    pub fn artifact_dir(mut self, dir: &str) -> Self {
        self.project.service.artifact_dir = dir.to_string();
        self
    }

    pub fn publish_tool(mut self, tool: &str) -> Self {
        self.project.publish.tool = tool.to_string();
        self
    }

    pub fn publish_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.project.publish.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn deployment_token(mut self, token: &str) -> Self {
        self.project.publish.deployment_token = Some(token.to_string());
        self
    }

    pub fn endpoints_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.project.publish.endpoints_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn remote_name(mut self, remote: &str) -> Self {
        self.project.pipeline.remote_name = remote.to_string();
        self
    }

    pub fn build(self) -> ProjectFile {
        self.project
    }
}
