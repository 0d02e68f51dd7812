//! Context teardown must run on every exit path, panics included.

use std::panic::{catch_unwind, AssertUnwindSafe};

use verge_cluster::OpgContext;

#[test]
fn context_released_when_computation_panics() {
    env_logger::builder().is_test(true).try_init().ok();

    let unwound = catch_unwind(AssertUnwindSafe(|| {
        let _ctx = OpgContext::new(1).expect("failed to provision context");
        panic!("computation failed mid-flight");
    }));
    assert!(unwound.is_err(), "inner computation must have panicked");

    // The unwound scope dropped its context; provisioning again must work.
    let ctx = OpgContext::new(1).expect("failed to re-provision after panic");
    assert_eq!(ctx.device_count(), 1);
}

#[test]
fn worker_panic_surfaces_as_error_not_poison() {
    env_logger::builder().is_test(true).try_init().ok();

    let ctx = OpgContext::new(1).expect("failed to provision context");
    let result = ctx.launch_partitioned(&[1u32, 2, 3], |_, _: &[u32]| -> anyhow::Result<()> {
        panic!("worker blew up");
    });
    assert!(result.is_err());

    // The same context stays usable after a worker panic.
    let sums = ctx
        .launch_partitioned(&[1u32, 2, 3], |_, chunk| Ok(chunk.iter().sum::<u32>()))
        .expect("context unusable after worker panic");
    assert_eq!(sums.iter().sum::<u32>(), 6);
}
