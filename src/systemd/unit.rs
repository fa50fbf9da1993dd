//! Parsing of systemd unit file names.
//!
//! Only template units (`web@.service`) and their instances
//! (`web@app1.service`) map onto services; a template names a service type
//! and an instance names one `(type, id)` pair.

/// A unit file name split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFile {
    name: String,
    extension: String,
    prefix: String,
    instance: Option<String>,
}

impl UnitFile {
    /// Parses a unit file name or path. Any directory part is dropped.
    pub fn parse(unit: &str) -> UnitFile {
        let name = unit.rsplit('/').next().unwrap_or(unit).to_string();
        let (stem, extension) = match name.rsplit_once('.') {
            Some((stem, extension)) => (stem, extension),
            None => (name.as_str(), ""),
        };
        let (prefix, instance) = match stem.split_once('@') {
            Some((prefix, instance)) => (prefix, Some(instance.to_string())),
            None => (stem, None),
        };
        UnitFile {
            prefix: prefix.to_string(),
            extension: extension.to_string(),
            instance,
            name,
        }
    }

    /// Unit name of the instance `(service_type, id)`.
    pub fn instance_name(service_type: &str, id: &str) -> String {
        format!("{}@{}.service", service_type, id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn is_service(&self) -> bool {
        self.extension == "service"
    }

    /// The part before `@`, which is the service type for templates and
    /// instances.
    pub fn service_type(&self) -> &str {
        &self.prefix
    }

    /// `web@.service`
    pub fn is_template(&self) -> bool {
        self.instance.as_deref() == Some("")
    }

    /// `web@app1.service`
    pub fn is_instance(&self) -> bool {
        self.instance.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Instance id, for instances only.
    pub fn id(&self) -> Option<&str> {
        self.instance.as_deref().filter(|id| !id.is_empty())
    }
}
