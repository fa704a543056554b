use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{Status, StatusInfo};

impl Repository {
    pub fn status(&self) -> anyhow::Result<StatusInfo> {
        self.ensure_initialized()?;

        let status_info = {
            let mut staging = self.staging();
            staging.rehydrate()?;

            Status::new(self).initialize(&staging)?
        };

        let mut writer = self.writer();
        status_info.render(&mut **writer)?;

        Ok(status_info)
    }
}
