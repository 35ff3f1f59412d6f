use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::features::FeatureVec;

/// Activity classes recognised by the trained random forest, by code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum Activity {
    Walking = 0,
    WalkingUpstairs = 1,
    WalkingDownstairs = 2,
    Sitting = 3,
    Standing = 4,
    Laying = 5,
}

pub const NUM_CLASSES: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown activity code {0}")]
pub struct UnknownActivity(pub u16);

impl Activity {
    pub const ALL: [Activity; NUM_CLASSES] = [
        Activity::Walking,
        Activity::WalkingUpstairs,
        Activity::WalkingDownstairs,
        Activity::Sitting,
        Activity::Standing,
        Activity::Laying,
    ];

    #[inline(always)]
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn label(self) -> &'static str {
        match self {
            Activity::Walking => "WALKING",
            Activity::WalkingUpstairs => "WALKING_UPSTAIRS",
            Activity::WalkingDownstairs => "WALKING_DOWNSTAIRS",
            Activity::Sitting => "SITTING",
            Activity::Standing => "STANDING",
            Activity::Laying => "LAYING",
        }
    }
}

impl TryFrom<u16> for Activity {
    type Error = UnknownActivity;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Activity::ALL
            .get(code as usize)
            .copied()
            .ok_or(UnknownActivity(code))
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a feature vector to a class code. The model lives outside this crate.
pub trait Classifier {
    fn classify(&self, features: &FeatureVec) -> u16;
}

impl<F> Classifier for F
where
    F: Fn(&FeatureVec) -> u16,
{
    #[inline(always)]
    fn classify(&self, features: &FeatureVec) -> u16 {
        self(features)
    }
}
