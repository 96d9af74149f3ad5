//! The signed-in student.
//!
//! A `LabSession` is created at sign-in and handed by reference to whatever
//! needs it. It is stored as a single JSON file so the next launch can skip
//! the sign-in screen.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use uuid::Uuid;

/// Grades the catalog covers.
pub const GRADES: std::ops::RangeInclusive<u8> = 5..=8;

const MAX_NAME_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabSession {
    pub id: Uuid,
    pub name: String,
    pub grade: u8,
    /// Unix timestamp of sign-in
    pub signed_in_at: i64,
}

impl LabSession {
    /// Start a session; the name and grade must already be valid.
    pub fn new(name: &str, grade: u8) -> Result<Self, String> {
        validate_name(name)?;
        validate_grade(grade)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            grade,
            signed_in_at: Utc::now().timestamp(),
        })
    }

    pub fn greeting(&self) -> String {
        format!("{} · Grade {}", self.name, self.grade)
    }
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(format!("Name must be {} characters or less", MAX_NAME_LEN));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c.is_ascii_digit() || c == ' ' || c == '-' || c == '\'');

    if !valid_chars {
        return Err(
            "Name can only contain letters, numbers, spaces, hyphens, and apostrophes".to_string(),
        );
    }

    Ok(())
}

pub fn validate_grade(grade: u8) -> Result<(), String> {
    if GRADES.contains(&grade) {
        Ok(())
    } else {
        Err(format!(
            "Grade must be between {} and {}",
            GRADES.start(),
            GRADES.end()
        ))
    }
}

/// Load a stored session. Missing or unreadable files mean "signed out".
pub fn load_session(path: &Path) -> Option<LabSession> {
    let json = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<LabSession>(&json) {
        Ok(session) if validate_grade(session.grade).is_ok() => Some(session),
        Ok(_) | Err(_) => {
            tracing::warn!(path = %path.display(), "discarding unreadable session file");
            None
        }
    }
}

pub fn save_session(path: &Path, session: &LabSession) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(session)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    fs::write(path, json)?;
    Ok(())
}

/// Sign out. Clearing an absent session is not an error.
pub fn clear_session(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("lab-session-{}", Uuid::new_v4()))
            .join("session.json")
    }

    #[test]
    fn test_validate_name_valid() {
        assert!(validate_name("Ayşe").is_ok());
        assert!(validate_name("Mary-Jane O'Neil").is_ok());
        assert!(validate_name("Student 7").is_ok());
    }

    #[test]
    fn test_validate_name_invalid() {
        assert!(validate_name("   ").is_err());
        assert!(validate_name("a".repeat(25).as_str()).is_err());
        assert!(validate_name("rm -rf /").is_err());
    }

    #[test]
    fn test_grade_bounds() {
        assert!(validate_grade(5).is_ok());
        assert!(validate_grade(8).is_ok());
        assert!(validate_grade(4).is_err());
        assert!(validate_grade(9).is_err());
    }

    #[test]
    fn test_new_trims_name() {
        let session = LabSession::new("  Zeynep  ", 6).unwrap();
        assert_eq!(session.name, "Zeynep");
        assert_eq!(session.greeting(), "Zeynep · Grade 6");
        assert!(LabSession::new("Zeynep", 12).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path();
        let session = LabSession::new("Mehmet", 7).unwrap();
        save_session(&path, &session).unwrap();
        assert_eq!(load_session(&path), Some(session));
        clear_session(&path).unwrap();
        assert_eq!(load_session(&path), None);
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_corrupt_session_is_signed_out() {
        let path = scratch_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{\"name\": 3}").unwrap();
        assert_eq!(load_session(&path), None);
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_clear_missing_session_is_ok() {
        assert!(clear_session(&scratch_path()).is_ok());
    }
}
