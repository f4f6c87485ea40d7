use chrono::{DateTime, Utc};

/// Registered account as stored. `password_hash` never leaves the service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account about to be inserted; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// A workout with its entries in display order.
///
/// `id` is `0` until the store assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub entries: Vec<WorkoutEntry>,
}

/// One exercise of a workout. `reps`, `duration_seconds` and `weight` are independent.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub id: i64,
    pub workout_id: i64,
    pub name: String,
    pub notes: String,
    pub sets: i32,
    pub reps: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub weight: Option<f64>,
    pub order_index: i32,
}

/// Partial update of a workout. `None` leaves the current value untouched.
///
/// Scalars merge field by field. `entries`, when present, replaces the whole
/// entry list, so `Some(vec![])` clears it.
#[derive(Debug, Clone, Default)]
pub struct WorkoutPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub calories_burned: Option<i32>,
    pub entries: Option<Vec<WorkoutEntry>>,
}

impl WorkoutPatch {
    pub fn apply_to(self, mut workout: Workout) -> Workout {
        if let Some(title) = self.title {
            workout.title = title;
        }
        if let Some(description) = self.description {
            workout.description = description;
        }
        if let Some(duration_minutes) = self.duration_minutes {
            workout.duration_minutes = duration_minutes;
        }
        if let Some(calories_burned) = self.calories_burned {
            workout.calories_burned = calories_burned;
        }
        if let Some(entries) = self.entries {
            workout.entries = entries;
        }
        workout
    }
}

pub const MAX_USERNAME_LEN: usize = 50;

/// Check a registration request. Returns the first failing rule as a client-facing message.
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), &'static str> {
    if username.is_empty() {
        return Err("username is required");
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err("username cannot be more than 50 characters");
    }
    if email.is_empty() {
        return Err("email is required");
    }
    if !is_valid_email(email) {
        return Err("email is not valid");
    }
    if password.is_empty() {
        return Err("password is required");
    }
    Ok(())
}

/// Syntactic address check: one `@`, bounded local part, dotted domain.
///
/// Single-label domains such as `localhost` are rejected. Callers trim first;
/// surrounding whitespace fails the check.
pub fn is_valid_email(email: &str) -> bool {
    const FORBIDDEN: [char; 11] = ['<', '>', '(', ')', '[', ']', '\\', ',', ';', ':', '"'];

    if email.is_empty() || email.len() > 254 {
        return false;
    }
    if email.chars().any(|c| c.is_whitespace() || FORBIDDEN.contains(&c)) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }
    if email.contains("..") || local.starts_with('.') || local.ends_with('.') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty() && !label.starts_with('-') && !label.ends_with('-')
        })
}
