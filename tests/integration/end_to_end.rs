//! Provider -> drivers -> poller -> sink

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;
use embedded_hal_async::i2c::{ErrorKind, NoAcknowledgeSource};
use lsm303dlm_async::{
    Accelerometer, BusSpeed, Magnetometer, Poller, PollerState, ReadError, DEFAULT_POLL_PERIOD,
};

use crate::common::{MockError, MockProvider, Snapshot};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_full_workflow() {
    let (mut provider, accel_handle, mag_handle) = MockProvider::new();
    // Low byte first: X = 2 counts = 2/512 G
    accel_handle.set_read_data(&[0x02, 0x00, 0x00, 0x00, 0x00, 0x00]);

    let (accel, mag) = block_on(async {
        let accel = Accelerometer::initialize(&mut provider).await.unwrap();
        let mag = Magnetometer::initialize(&mut provider).await.unwrap();
        (accel, mag)
    });

    assert_eq!(
        provider.requests,
        vec![(0x18, BusSpeed::Fast), (0x1E, BusSpeed::Fast)]
    );

    // Transport failure on the magnetometer only
    mag_handle.fail_reads(true);

    let mut poller = Poller::new(accel, mag);
    let stop: Signal<CriticalSectionRawMutex, ()> = Signal::new();
    let mut snapshots = Vec::new();

    let released = block_on(poller.run(
        Duration::from_millis(10),
        &stop,
        &mut |snapshot: Snapshot| {
            snapshots.push(snapshot);
            if snapshots.len() == 2 {
                stop.signal(());
            }
        },
    ))
    .unwrap();

    assert_eq!(snapshots.len(), 2);
    for snapshot in &snapshots {
        let accel = snapshot.accel.as_ref().unwrap();
        assert!(approx(accel.x, 0.004));
        assert!(approx(accel.y, 0.0));
        assert!(approx(accel.z, 0.0));
        assert_eq!(snapshot.accel_status().to_string(), "Status: Running");

        assert!(matches!(snapshot.mag, Err(ReadError::Bus(MockError::Nack))));
        assert_eq!(
            snapshot.mag_status().to_string(),
            format!(
                "Failed to read from Magnetometer: {}",
                ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            )
        );
    }

    assert_eq!(poller.state(), PollerState::Stopped);
    assert!(poller.stop().is_none());

    drop(released);
    assert_eq!(accel_handle.drops(), 1);
    assert_eq!(mag_handle.drops(), 1);
}

#[test]
fn test_high_byte_in_second_position_reads_as_one_g() {
    let (mut provider, accel_handle, _mag_handle) = MockProvider::new();
    accel_handle.set_read_data(&[0x00, 0x02, 0x00, 0x00, 0x00, 0x00]);

    let accel = block_on(Accelerometer::initialize(&mut provider)).unwrap();
    let mag = block_on(Magnetometer::initialize(&mut provider)).unwrap();
    let mut poller = Poller::new(accel, mag);

    let snapshot = block_on(poller.poll_once()).unwrap();

    assert!(approx(snapshot.accel.unwrap().x, 1.0));
}

#[test]
fn test_default_period_is_100ms() {
    assert_eq!(DEFAULT_POLL_PERIOD, Duration::from_millis(100));
}
