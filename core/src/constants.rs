// Defaults used when a config leaves a field unset.

/// Expected decoded size of a typical profile; pre-allocation only.
pub const DEFAULT_SIZE_HINT: u64 = 64 * 1024; // 64 KiB

/// Hard ceiling on decoded bytes per payload (inclusive).
pub const DEFAULT_MAX_SIZE: u64 = 16 * 1024 * 1024; // 16 MiB
