use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use derive_new::new;

/// One commit as `log` and `global-log` print it
///
/// ```text
/// ===
/// commit <oid>
/// Merge: <short first parent> <short second parent>
/// Date: Thu Nov 9 20:00:05 2017 -0800
/// <message>
///
/// ```
#[derive(new)]
pub struct LogEntry<'c> {
    oid: &'c ObjectId,
    commit: &'c Commit,
}

impl std::fmt::Display for LogEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===")?;
        writeln!(f, "{}", format!("commit {}", self.oid).yellow())?;

        if let [first, second] = self.commit.parents() {
            writeln!(
                f,
                "Merge: {} {}",
                first.to_short_oid(),
                second.to_short_oid()
            )?;
        }

        writeln!(f, "Date: {}", self.commit.timestamp().readable())?;
        writeln!(f, "{}", self.commit.message())?;
        writeln!(f)
    }
}
