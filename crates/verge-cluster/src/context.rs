//! Scoped multi-device execution context.
//!
//! An [`OpgContext`] provisions an exact number of logical devices for the
//! duration of a scope. Work is partitioned round-robin across the devices
//! and executed on one worker thread per device; the context releases its
//! devices when dropped, on normal return and during unwinding alike.

use anyhow::{ensure, Context as _, Result};

use crate::devices::{get_visible_devices, Device};

/// A provisioned multi-device execution context.
///
/// Construction validates the requested device count against visibility;
/// dropping the context releases the provisioned devices. There is no
/// retry, cancellation, or timeout at this layer: a task error or panic on
/// any worker surfaces after all workers have been joined.
///
/// # Example
///
/// ```no_run
/// use verge_cluster::OpgContext;
///
/// let ctx = OpgContext::new(2)?;
/// let sums = ctx.launch_partitioned(&[1u64, 2, 3, 4, 5], |device, chunk| {
///     log::debug!("device {} takes {} items", device.id, chunk.len());
///     Ok(chunk.iter().sum::<u64>())
/// })?;
/// assert_eq!(sums.iter().sum::<u64>(), 15);
/// # anyhow::Ok(())
/// ```
pub struct OpgContext {
    devices: Vec<Device>,
}

impl OpgContext {
    /// Provisions a context over the first `device_count` visible devices.
    ///
    /// # Errors
    /// Fails if `device_count` is zero or exceeds the number of visible
    /// devices.
    pub fn new(device_count: usize) -> Result<Self> {
        let visible = get_visible_devices();
        ensure!(device_count >= 1, "device count must be at least 1");
        ensure!(
            device_count <= visible.len(),
            "requested {} devices but only {} visible",
            device_count,
            visible.len()
        );

        let devices: Vec<Device> = visible.into_iter().take(device_count).collect();
        log::info!("provisioned OPG context with {} device(s)", devices.len());
        Ok(Self { devices })
    }

    /// Provisions a context over an explicit device list.
    pub fn with_devices(devices: Vec<Device>) -> Result<Self> {
        ensure!(!devices.is_empty(), "device list cannot be empty");
        log::info!(
            "provisioned OPG context with {} explicit device(s)",
            devices.len()
        );
        Ok(Self { devices })
    }

    /// Number of provisioned devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// The provisioned devices.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Distributes items round-robin across the provisioned devices.
    ///
    /// Returns `(device_index, items)` tuples; later devices may receive
    /// one item fewer when the count does not divide evenly.
    pub fn distribute_work<T: Clone>(&self, items: &[T]) -> Vec<(usize, Vec<T>)> {
        let num_devices = self.devices.len();
        let mut distributions: Vec<Vec<T>> = vec![Vec::new(); num_devices];

        for (i, item) in items.iter().enumerate() {
            distributions[i % num_devices].push(item.clone());
        }

        distributions.into_iter().enumerate().collect()
    }

    /// Runs `task` over a round-robin partition of `items`, one worker
    /// thread per device with a non-empty chunk.
    ///
    /// Results are returned in device order. All workers are joined before
    /// the first error (task failure or worker panic) propagates.
    pub fn launch_partitioned<T, R, F>(&self, items: &[T], task: F) -> Result<Vec<R>>
    where
        T: Clone + Send + Sync,
        R: Send,
        F: Fn(&Device, &[T]) -> Result<R> + Sync,
    {
        let chunks = self.distribute_work(items);
        let mut outcomes: Vec<(usize, Result<R>)> = Vec::new();

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(chunks.len());
            for (device_idx, chunk) in &chunks {
                if chunk.is_empty() {
                    continue;
                }
                let device = &self.devices[*device_idx];
                let task = &task;
                log::debug!(
                    "device {}: dispatching {} work item(s)",
                    device.id,
                    chunk.len()
                );
                handles.push((
                    *device_idx,
                    scope.spawn(move || task(device, chunk.as_slice())),
                ));
            }

            for (device_idx, handle) in handles {
                let outcome = match handle.join() {
                    Ok(result) => result,
                    Err(_) => Err(anyhow::anyhow!(
                        "worker thread for device {} panicked",
                        self.devices[device_idx].id
                    )),
                };
                outcomes.push((device_idx, outcome));
            }
        });

        let mut results = Vec::with_capacity(outcomes.len());
        for (device_idx, outcome) in outcomes {
            let value = outcome.with_context(|| {
                format!("OPG task failed on device {}", self.devices[device_idx].id)
            })?;
            results.push(value);
        }
        Ok(results)
    }
}

impl Drop for OpgContext {
    fn drop(&mut self) {
        log::info!("released OPG context ({} device(s))", self.devices.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with(count: usize) -> OpgContext {
        OpgContext::with_devices((0..count).map(Device::new).collect()).unwrap()
    }

    #[test]
    fn test_new_rejects_zero_devices() {
        assert!(OpgContext::new(0).is_err());
    }

    #[test]
    fn test_new_single_device() {
        let ctx = OpgContext::new(1).unwrap();
        assert_eq!(ctx.device_count(), 1);
    }

    #[test]
    fn test_with_devices_rejects_empty() {
        assert!(OpgContext::with_devices(Vec::new()).is_err());
    }

    #[test]
    fn test_distribute_work_round_robin() {
        let ctx = ctx_with(2);
        let distribution = ctx.distribute_work(&[1, 2, 3, 4, 5, 6, 7, 8]);

        assert_eq!(distribution[0], (0, vec![1, 3, 5, 7]));
        assert_eq!(distribution[1], (1, vec![2, 4, 6, 8]));
    }

    #[test]
    fn test_distribute_work_more_devices_than_items() {
        let ctx = ctx_with(4);
        let distribution = ctx.distribute_work(&[10, 20]);

        assert_eq!(distribution[0].1, vec![10]);
        assert_eq!(distribution[1].1, vec![20]);
        assert!(distribution[2].1.is_empty());
        assert!(distribution[3].1.is_empty());
    }

    #[test]
    fn test_launch_partitioned_sums() {
        let ctx = ctx_with(3);
        let partials = ctx
            .launch_partitioned(&[1u64, 2, 3, 4, 5, 6, 7], |_, chunk| {
                Ok(chunk.iter().sum::<u64>())
            })
            .unwrap();

        assert_eq!(partials.len(), 3);
        assert_eq!(partials.iter().sum::<u64>(), 28);
    }

    #[test]
    fn test_launch_partitioned_skips_idle_devices() {
        let ctx = ctx_with(4);
        let partials = ctx
            .launch_partitioned(&[1u64], |_, chunk| Ok(chunk.len()))
            .unwrap();

        // Only the device with a non-empty chunk runs.
        assert_eq!(partials, vec![1]);
    }

    #[test]
    fn test_launch_partitioned_propagates_task_error() {
        let ctx = ctx_with(2);
        let result = ctx.launch_partitioned(&[1, 2, 3, 4], |device, _: &[i32]| {
            if device.id == 1 {
                anyhow::bail!("synthetic failure");
            }
            Ok(())
        });

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("synthetic failure"));
    }

    #[test]
    fn test_launch_partitioned_converts_worker_panic() {
        let ctx = ctx_with(2);
        let result = ctx.launch_partitioned(&[1, 2], |device, _: &[i32]| {
            if device.id == 0 {
                panic!("worker blew up");
            }
            Ok(device.id)
        });

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("panicked"));
    }
}
