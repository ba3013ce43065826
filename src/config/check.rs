//! `config --check`: report keys missing from the YAML file.
//!
//! Missing keys fall back to serde defaults at load time, so this is advisory.

use serde_yaml::Value;

pub const KNOWN_KEYS: [&str; 7] = [
    "database",
    "reporting_start",
    "trailing_window_days",
    "equipment",
    "recent_limit",
    "device_log_limit",
    "separator_char",
];

/// Keys of `KNOWN_KEYS` absent from `content`, and keys present but unknown.
pub fn check_keys(content: &str) -> Result<(Vec<&'static str>, Vec<String>), serde_yaml::Error> {
    let yaml: Value = serde_yaml::from_str(content)?;
    let Some(map) = yaml.as_mapping() else {
        return Ok((KNOWN_KEYS.to_vec(), Vec::new()));
    };

    let present: Vec<String> = map
        .keys()
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect();

    let missing = KNOWN_KEYS
        .iter()
        .copied()
        .filter(|k| !present.iter().any(|p| p == k))
        .collect();
    let unknown = present
        .into_iter()
        .filter(|p| !KNOWN_KEYS.contains(&p.as_str()))
        .collect();

    Ok((missing, unknown))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_missing_and_unknown_keys() {
        let (missing, unknown) =
            check_keys("database: a.sqlite\nequipment: [Woodshop]\nmin_work_duration: 8h\n")
                .unwrap();
        assert_eq!(
            missing,
            [
                "reporting_start",
                "trailing_window_days",
                "recent_limit",
                "device_log_limit",
                "separator_char"
            ]
        );
        assert_eq!(unknown, ["min_work_duration"]);
    }

    #[test]
    fn complete_file_is_clean() {
        let yaml = crate::config::Config::default().to_yaml().unwrap();
        let (missing, unknown) = check_keys(&yaml).unwrap();
        assert!(missing.is_empty());
        assert!(unknown.is_empty());
    }
}
