//! Settings form submission
//! 设置表单提交

use cp_core::{SettingKey, Settings, SettingsError};

/// Raw values as entered in the settings dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsForm {
    pub poll_interval_ms: i64,
    pub max_clips: i64,
}

impl SettingsForm {
    pub fn value(&self, key: SettingKey) -> i64 {
        match key {
            SettingKey::PollInterval => self.poll_interval_ms,
            SettingKey::MaxClips => self.max_clips,
        }
    }
}

impl From<Settings> for SettingsForm {
    fn from(settings: Settings) -> Self {
        Self {
            poll_interval_ms: settings.get(SettingKey::PollInterval),
            max_clips: settings.get(SettingKey::MaxClips),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingChange {
    pub key: SettingKey,
    pub old: i64,
    pub new: i64,
}

/// Fields of a form that differ from the effective settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsDiff {
    changes: Vec<SettingChange>,
}

impl SettingsDiff {
    /// Validates every field of `form` and collects the changed ones.
    ///
    /// Fails on the first invalid field; a form is applied whole or not at all.
    pub fn between(current: &Settings, form: &SettingsForm) -> Result<Self, SettingsError> {
        let mut changes = Vec::new();
        for key in SettingKey::ALL {
            let new = form.value(key);
            key.validate(new)?;
            let old = current.get(key);
            if old != new {
                changes.push(SettingChange { key, old, new });
            }
        }
        Ok(Self { changes })
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &[SettingChange] {
        &self.changes
    }

    /// Convert to a structured log string
    pub fn to_log_string(&self) -> String {
        if self.changes.is_empty() {
            return "(no changes)".to_string();
        }
        self.changes
            .iter()
            .map(|c| format!("{}: {} → {}", c.key, c.old, c.new))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_form_yields_empty_diff() {
        let current = Settings::default();
        let diff = SettingsDiff::between(&current, &SettingsForm::from(current)).unwrap();

        assert!(diff.is_empty());
        assert_eq!(diff.to_log_string(), "(no changes)");
    }

    #[test]
    fn only_changed_fields_are_listed() {
        let current = Settings::default();
        let form = SettingsForm {
            poll_interval_ms: 200,
            max_clips: 25,
        };

        let diff = SettingsDiff::between(&current, &form).unwrap();

        assert_eq!(
            diff.changes(),
            [SettingChange {
                key: SettingKey::MaxClips,
                old: 10,
                new: 25
            }]
        );
        assert_eq!(diff.to_log_string(), "max_clips: 10 → 25");
    }

    #[test]
    fn any_invalid_field_rejects_the_whole_form() {
        let form = SettingsForm {
            poll_interval_ms: 0,
            max_clips: 25,
        };

        let err = SettingsDiff::between(&Settings::default(), &form).unwrap_err();

        assert!(err.is_invalid_value());
    }
}
