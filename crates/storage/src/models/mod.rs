use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Declares a closed set of snake_case string values with serde, OpenAPI,
/// `Display` and `FromStr` support.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::utoipa::ToSchema,
        )]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $value)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::models::UnknownVariant;

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err($crate::models::UnknownVariant {
                        kind: stringify!($name),
                        value: value.to_string(),
                    }),
                }
            }
        }
    };
}

mod goal;
mod personal_record;
mod workout;
mod workout_plan;

pub use goal::{Goal, GoalPriority, GoalStatus, GoalType};
pub use personal_record::{PersonalRecord, RecordType, best_previous_record};
pub use workout::{Workout, WorkoutExercise, WorkoutSet, WorkoutStatus};
pub use workout_plan::{Difficulty, PlanExercise, WorkoutCategory, WorkoutPlan};

/// A string did not name any member of a closed value set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// A stored domain record with a server-assigned identity.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human readable name used in messages, e.g. "Workout plan".
    const NAME: &'static str;

    fn id(&self) -> Uuid;

    /// Refreshes `updated_at`, never moving it backwards.
    fn touch(&mut self, now: DateTime<Utc>);
}

macro_rules! impl_entity {
    ($ty:ty, $name:literal) => {
        impl Entity for $ty {
            const NAME: &'static str = $name;

            fn id(&self) -> Uuid {
                self.id
            }

            fn touch(&mut self, now: DateTime<Utc>) {
                self.updated_at = self.updated_at.max(now);
            }
        }
    };
}

impl_entity!(WorkoutPlan, "Workout plan");
impl_entity!(Workout, "Workout");
impl_entity!(Goal, "Goal");
impl_entity!(PersonalRecord, "Personal record");
