// ABOUTME: Device identifier generation for registration
// ABOUTME: Deterministic project-scoped model id, random-suffixed instance id

use uuid::Uuid;

/// Build the device-model id for a project
///
/// Model ids are global across the registration API, so the project id is
/// baked in to keep them unique per project. Re-runs produce the same id,
/// which the registrar tolerates as an already-exists conflict.
pub fn device_model_id(project_id: &str) -> String {
    format!("{}-hearth-model", project_id)
}

/// Build a fresh device-instance id
///
/// The random suffix avoids collisions with instances registered by
/// earlier runs against the same project.
pub fn device_instance_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("hearth-instance-{}", &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_id_is_project_scoped() {
        assert_eq!(device_model_id("my-project"), "my-project-hearth-model");
    }

    #[test]
    fn test_model_id_is_deterministic() {
        assert_eq!(device_model_id("p"), device_model_id("p"));
    }

    #[test]
    fn test_instance_id_shape() {
        let id = device_instance_id();
        assert!(id.starts_with("hearth-instance-"));

        let suffix = id.strip_prefix("hearth-instance-").unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_instance_ids_differ_between_runs() {
        assert_ne!(device_instance_id(), device_instance_id());
    }
}
