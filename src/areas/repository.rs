use crate::REPOSITORY_DIR;
use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Handle on one repository: the working directory plus its `.twig` metadata
///
/// Every operation is a method on this handle; nothing is cached across
/// processes beyond what the areas persist on disk.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    staging: RefCell<StagingArea>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve repository path {}", path.display()))?;
        let twig_path = path.join(REPOSITORY_DIR);

        let staging = StagingArea::new(twig_path.join("index").into_boxed_path());
        let database = Database::new(twig_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(twig_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            staging: RefCell::new(staging),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn twig_path(&self) -> Box<Path> {
        self.path.join(REPOSITORY_DIR).into_boxed_path()
    }

    pub fn is_initialized(&self) -> bool {
        self.twig_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            return Err(TwigError::NotInitialized.into());
        }
        Ok(())
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// Staging area as last loaded; callers rehydrate it before reading
    pub fn staging(&'_ self) -> RefMut<'_, StagingArea> {
        self.staging.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Tip of the checked-out branch, parsed
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head_oid = self.refs.read_head()?;
        let head_commit = self.database.parse_object_as_commit(&head_oid)?;

        Ok((head_oid, head_commit))
    }
}
