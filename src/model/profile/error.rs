#[derive(thiserror::Error, Debug)]
pub enum ProfileError {
    #[error("invalid artifact: profile {0} has a zero day_mask")]
    ZeroDayMask(u16),
    #[error("invalid artifact: profile {profile} day_mask {mask:#x} does not fit in 7 bits")]
    DayMaskTooWide { profile: u16, mask: u16 },
    #[error("invalid artifact: profile {0} has no buckets")]
    NoBuckets(u16),
    #[error("invalid artifact: profile {0} has non-positive scale {1}")]
    BadScale(u16, f64),
    #[error("invalid artifact: profile {profile} bucket {index} is not finite/positive: {value}")]
    BadBucket {
        profile: u16,
        index: usize,
        value: f64,
    },
    #[error("invalid artifact: profile {profile} bucket {index} * scale is not finite/positive: {value}")]
    BadScaledBucket {
        profile: u16,
        index: usize,
        value: f64,
    },
    #[error("invalid artifact: duplicate profile id {0}")]
    DuplicateProfileId(u16),
}
