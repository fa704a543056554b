use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::path::Path;

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// Blob id the file at `path` would get if it were added now
    pub fn hash_workspace_file(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        let workspace = self.repository.workspace();
        if !workspace.is_file(path) {
            return Ok(None);
        }

        Ok(Some(workspace.parse_blob(path)?.object_id()?))
    }

    /// Compare the file at `path` with the blob it is expected to hold
    ///
    /// Content is hashed every time; timestamps and sizes are never trusted.
    pub fn check_against_workspace(
        &self,
        path: &Path,
        expected: &ObjectId,
    ) -> anyhow::Result<Option<WorkspaceChangeType>> {
        match self.hash_workspace_file(path)? {
            None => Ok(Some(WorkspaceChangeType::Deleted)),
            Some(oid) if &oid != expected => Ok(Some(WorkspaceChangeType::Modified)),
            Some(_) => Ok(None),
        }
    }
}
