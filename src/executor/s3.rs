//! S3 storage session

use super::StorageSession;
use crate::types::{DeployError, Region, ResolvedUpload};
use aws_sdk_s3::config::{BehaviorVersion, Credentials};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{MetadataDirective, ObjectCannedAcl};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tokio::runtime::{Builder, Runtime};

/// Characters escaped in the `x-amz-copy-source` header; `/` is kept.
const COPY_SOURCE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Connection parameters for [`S3Session::open`]
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: Region,
    /// Custom endpoint URL; path-style addressing is used when set
    pub endpoint: Option<String>,
}

/// Session against one S3 bucket
///
/// Requests are issued one at a time by blocking on a private
/// current-thread runtime, so callers stay synchronous.
pub struct S3Session {
    runtime: Runtime,
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Session {
    pub fn open(settings: S3Settings) -> Result<Self, DeployError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(DeployError::Io)?;

        let credentials = Credentials::new(
            settings.access_key,
            settings.secret_key,
            None,
            None,
            "s3deploy",
        );

        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(settings.region.as_str()))
            .credentials_provider(credentials);
        if let Some(endpoint) = settings.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        tracing::debug!(
            bucket = %settings.bucket,
            region = %settings.region,
            "opened storage session"
        );

        Ok(Self {
            runtime,
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket: settings.bucket,
        })
    }

    fn copy_source(&self, key: &str) -> String {
        utf8_percent_encode(&format!("{}/{}", self.bucket, key), COPY_SOURCE).to_string()
    }
}

impl StorageSession for S3Session {
    fn copy_object(&self, upload: &ResolvedUpload) -> Result<(), DeployError> {
        let request = self
            .client
            .copy_object()
            .bucket(&self.bucket)
            .key(&upload.destination_key)
            .copy_source(self.copy_source(&upload.source_key))
            .acl(ObjectCannedAcl::PublicRead)
            .metadata_directive(MetadataDirective::Replace)
            .content_type(&upload.content_type)
            .cache_control(upload.cache_control())
            .content_encoding(upload.content_encoding);

        self.runtime
            .block_on(request.send())
            .map(|_| ())
            .map_err(|e| DeployError::Upload {
                key: upload.destination_key.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })
    }
}

impl std::fmt::Debug for S3Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Session")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}
