//! # Panel Integration Tests
//!
//! Drive whole panels over [`MockTransport`] and check the exact bytes that
//! reach the wire.

use flipdot_panel::panel::{PanelConfig, PanelGeometry};
use flipdot_panel::protocol::{Address, frame};
use flipdot_panel::render::patterns;
use flipdot_panel::transport::MockTransport;
use flipdot_panel::{Panel, PanelError};
use pretty_assertions::assert_eq;

fn mock_panel(geometry: PanelGeometry, address: Address) -> (Panel, MockTransport) {
    let mock = MockTransport::new();
    let panel = Panel::with_transport(geometry.width, geometry.height, mock.clone())
        .unwrap()
        .with_address(address);
    (panel, mock)
}

#[test]
fn refresh_overwrites_every_board_with_one_bitmap() {
    let bus = MockTransport::new();
    let mut left = Panel::with_transport(28, 7, bus.clone())
        .unwrap()
        .with_address(Address::new(vec![0x01]));
    let mut right = Panel::with_transport(28, 7, bus.clone())
        .unwrap()
        .with_address(Address::new(vec![0x02]));

    patterns::draw(&patterns::Border, left.bitmap_mut());
    patterns::draw(&patterns::Fill(true), right.bitmap_mut());
    left.queue();
    right.queue();
    left.refresh().unwrap();

    let writes = bus.writes();
    assert_eq!(writes.len(), 3);

    let first = frame::inspect(&writes[0]).unwrap();
    assert_eq!((first.command, first.refresh), (0x84, false));
    assert_eq!(first.address, vec![0x01]);
    assert_eq!(first.payload[0], 0x7F);
    assert_eq!(first.payload[1], 0x41);

    let second = frame::inspect(&writes[1]).unwrap();
    assert_eq!(second.address, vec![0x02]);
    assert_eq!(second.payload, vec![0x7F; 28]);

    let last = frame::inspect(&writes[2]).unwrap();
    assert_eq!((last.command, last.refresh), (0x83, true));
    assert_eq!(last.address, vec![0xFF]);
    // Every board now shows left's border, not its own queued data
    assert_eq!(last.payload, frame::pack_columns(left.bitmap()));
    let mut border = vec![0x41; 28];
    border[0] = 0x7F;
    border[27] = 0x7F;
    assert_eq!(last.payload, border);
}

#[test]
fn queue_each_board_then_refresh_all() {
    let bus = MockTransport::new();
    let mut left = Panel::with_transport(28, 7, bus.clone())
        .unwrap()
        .with_address(Address::new(vec![0x01]));
    let mut right = Panel::with_transport(28, 7, bus.clone())
        .unwrap()
        .with_address(Address::new(vec![0x02]));

    patterns::draw(&patterns::Border, left.bitmap_mut());
    patterns::draw(&patterns::Fill(true), right.bitmap_mut());
    left.try_queue().unwrap();
    right.try_queue().unwrap();
    left.send_raw(&frame::refresh_all()).unwrap();

    let writes = bus.writes();
    assert_eq!(writes.len(), 3);
    assert_eq!(frame::inspect(&writes[0]).unwrap().address, vec![0x01]);
    assert_eq!(frame::inspect(&writes[1]).unwrap().address, vec![0x02]);

    // No payload, so neither board's queued data is replaced
    assert_eq!(writes[2], vec![0x80, 0x82, 0x8F]);
    let last = frame::inspect(&writes[2]).unwrap();
    assert_eq!((last.command, last.refresh), (0x82, true));
    assert!(last.payload.is_empty());
}

#[test]
fn every_preset_sends_a_full_frame() {
    for &geometry in PanelGeometry::PRESETS {
        let (mut panel, mock) = mock_panel(geometry, Address::broadcast());
        panel.send().unwrap();
        let writes = mock.writes();
        assert_eq!(writes.len(), 1, "{}", geometry.name);
        assert_eq!(writes[0].len(), 1 + geometry.width + 3, "{}", geometry.name);
    }
}

#[test]
fn short_write_reports_both_counts() {
    let mock = MockTransport::new().short_by(1);
    let mut panel = Panel::with_transport(56, 7, mock).unwrap();
    match panel.send() {
        Err(PanelError::ShortWrite { expected, actual }) => {
            assert_eq!(expected, 60);
            assert_eq!(actual, 59);
        }
        other => panic!("expected short write, got {:?}", other),
    }
}

#[test]
fn out_of_range_sets_leave_frame_unchanged() {
    let (mut panel, _mock) = mock_panel(PanelGeometry::XY5_14X7, Address::broadcast());
    let before = panel.frame(true).unwrap();
    for (x, y) in [(-1, -1), (14, 0), (0, 7), (100, 100)] {
        panel.set(x, y, true);
    }
    assert_eq!(panel.frame(true).unwrap(), before);
}

#[test]
fn config_opens_debug_panel_with_address() {
    let config = PanelConfig::from_json(r#"{"width": 7, "height": 7, "address": [5]}"#).unwrap();
    let mut panel = config.open().unwrap();
    assert!(panel.is_debug());
    assert_eq!(panel.address(), &Address::new(vec![5]));

    panel.clear(true);
    let bytes = panel.frame(false).unwrap();
    assert_eq!(
        bytes,
        vec![0x80, 0x88, 0x05, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x8F]
    );
    assert!(panel.send().is_ok());
}

#[test]
fn columns_round_trip_through_the_bitmap() {
    let (mut panel, mock) = mock_panel(PanelGeometry::XY5_7X7, Address::broadcast());
    let columns = [0x7F, 0x41, 0x41, 0x41, 0x41, 0x41, 0x7F];
    panel.bitmap_mut().fill_columns(&columns);
    panel.send().unwrap();

    let parts = frame::inspect(&mock.writes()[0]).unwrap();
    assert_eq!(parts.payload, columns.to_vec());
}
