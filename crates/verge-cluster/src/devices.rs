//! Logical compute device discovery.

/// Environment variable listing visible device ids, comma-separated.
///
/// Mirrors the visibility convention of GPU runtimes: when set, only the
/// listed device ordinals are considered available.
pub const VISIBLE_DEVICES_ENV: &str = "VERGE_VISIBLE_DEVICES";

/// A logical compute device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Device ordinal
    pub id: usize,
    /// Human-readable name for logs
    pub name: String,
}

impl Device {
    /// Creates a device with the default name for its ordinal.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            name: format!("worker-{}", id),
        }
    }
}

/// Returns the list of visible compute devices.
///
/// Reads [`VISIBLE_DEVICES_ENV`] (comma-separated ordinals; malformed
/// entries are skipped with a warning). Without the override, one device
/// per available CPU core is reported, with a single-device floor.
pub fn get_visible_devices() -> Vec<Device> {
    if let Ok(raw) = std::env::var(VISIBLE_DEVICES_ENV) {
        let mut devices = Vec::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.parse::<usize>() {
                Ok(id) => devices.push(Device::new(id)),
                Err(_) => {
                    log::warn!(
                        "ignoring malformed entry '{}' in {}",
                        entry,
                        VISIBLE_DEVICES_ENV
                    );
                }
            }
        }
        if !devices.is_empty() {
            log::debug!("{} devices visible via {}", devices.len(), VISIBLE_DEVICES_ENV);
            return devices;
        }
        log::warn!(
            "{} is set but contains no usable ids; falling back to core count",
            VISIBLE_DEVICES_ENV
        );
    }

    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (0..cores).map(Device::new).collect()
}
