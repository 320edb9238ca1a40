use super::Site;

#[derive(Debug, Clone, Default)]
pub struct CreateSiteDto {
    pub name: Option<String>,
    pub port: Option<String>,
    /// Required; `None` is rejected before the store is touched.
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSiteDto {
    pub name: Option<String>,
    pub port: Option<String>,
}

impl UpdateSiteDto {
    pub fn apply_to(self, site: &mut Site) {
        if let Some(name) = self.name {
            site.name = Some(name);
        }
        if let Some(port) = self.port {
            site.port = Some(port);
        }
    }
}
