/// Operator-forced locality, used verbatim as cloud name, region and locality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualLocation {
    location: String,
}

impl ManualLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.location
    }
}
