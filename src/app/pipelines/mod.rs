pub mod transcode_pipeline;

pub use transcode_pipeline::TranscodePipeline;
