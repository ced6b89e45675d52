//! Storage session seam

use crate::types::{DeployError, ResolvedUpload};

/// Connection to the target bucket
///
/// The only capability the deploy needs: copy an object within the bucket
/// from `upload.source_key` to `upload.destination_key`, replacing its
/// metadata, making it publicly readable and setting the content type,
/// cache control and content encoding headers of `upload`.
pub trait StorageSession {
    fn copy_object(&self, upload: &ResolvedUpload) -> Result<(), DeployError>;
}

impl<S: StorageSession + ?Sized> StorageSession for &S {
    fn copy_object(&self, upload: &ResolvedUpload) -> Result<(), DeployError> {
        (**self).copy_object(upload)
    }
}

impl<S: StorageSession + ?Sized> StorageSession for Box<S> {
    fn copy_object(&self, upload: &ResolvedUpload) -> Result<(), DeployError> {
        (**self).copy_object(upload)
    }
}
