use crate::errors::ModelError;

/// Collects field violations for one document and turns them into a single
/// `ModelError::Validation`, e.g. `Group validation failed: name: ..., startYear: ...`.
#[derive(Debug)]
pub struct Violations {
    entity: &'static str,
    items: Vec<String>,
}

impl Violations {
    pub fn new(entity: &'static str) -> Self {
        Self { entity, items: Vec::new() }
    }

    pub fn push(&mut self, path: &str, message: impl Into<String>) {
        self.items.push(format!("{}: {}", path, message.into()));
    }

    /// Record the standard "is required" violation.
    pub fn required(&mut self, path: &str) {
        let field = path.rsplit('.').next().unwrap_or(path);
        self.push(path, format!("Path `{}` is required.", field));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_result(self) -> Result<(), ModelError> {
        if self.items.is_empty() {
            return Ok(());
        }
        Err(ModelError::Validation(format!(
            "{} validation failed: {}",
            self.entity,
            self.items.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_ok() {
        assert!(Violations::new("Group").into_result().is_ok());
    }

    #[test]
    fn joins_all_violations() {
        let mut v = Violations::new("Student");
        v.required("name");
        v.required("address.town");
        let msg = v.into_result().unwrap_err().to_string();
        assert_eq!(
            msg,
            "Student validation failed: name: Path `name` is required., address.town: Path `town` is required."
        );
    }
}
