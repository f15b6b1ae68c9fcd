//! # Print Job Tests
//!
//! These tests drive the protocol driver end to end against mock
//! transports, with no hardware in the loop.
//!
//! ## Test Coverage
//!
//! - **Wire sequencing**: the exact packet order (six init packets, raster
//!   header, payload, feed) and the write/flush/read lockstep after every
//!   packet
//! - **Fail-fast checks**: oversized or inconsistent images are rejected
//!   before a single byte reaches the transport
//! - **Resource release**: the transport is dropped exactly once on every
//!   exit path, wherever in the sequence a fault is injected
//! - **Full pipeline**: render -> rotate -> fit -> pack -> print with a
//!   host font, when one is installed (skipped otherwise)

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;

use p12_label::render::{self, StyleSpec};
use p12_label::transport::Transport;
use p12_label::{Bitmap, LabelError, PackedImage, Phase, PrintJob, PrinterConfig, pack};

/// The six initialization packets as captured from the vendor app.
const INIT_PACKETS: [&str; 6] = [
    "1f1138",
    "1f11111f11121f11091f1113",
    "1f1109",
    "1f11191f1111",
    "1f1119",
    "1f1107",
];

/// Raster command opcode prefix.
const RASTER_PREFIX: &str = "1b401d763000";

/// Tape feed packet.
const FEED: &str = "1b640d1b640d";

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn from_hex(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

/// One transport call, as observed by a mock.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Write(Vec<u8>),
    Flush,
    Read,
}

/// Records every transport call. The log is shared through an `Arc` so it
/// outlives the transport, which the print job consumes.
#[derive(Default)]
struct RecordingTransport {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingTransport {
    fn new() -> (Self, Arc<Mutex<Vec<Event>>>) {
        let transport = Self::default();
        let events = Arc::clone(&transport.events);
        (transport, events)
    }
}

impl Transport for RecordingTransport {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.events.lock().unwrap().push(Event::Write(data.to_vec()));
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.events.lock().unwrap().push(Event::Flush);
        Ok(())
    }

    fn read(&mut self) -> io::Result<Vec<u8>> {
        self.events.lock().unwrap().push(Event::Read);
        Ok(Vec::new())
    }
}

/// Fails the Nth write and counts drops, so tests can assert the transport
/// is released exactly once however the job ends.
struct FaultTransport {
    fail_at_write: usize,
    writes: usize,
    drops: Arc<AtomicUsize>,
}

impl FaultTransport {
    fn new(fail_at_write: usize, drops: Arc<AtomicUsize>) -> Self {
        Self {
            fail_at_write,
            writes: 0,
            drops,
        }
    }
}

impl Transport for FaultTransport {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.writes == self.fail_at_write {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "injected fault"));
        }
        self.writes += 1;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn read(&mut self) -> io::Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

impl Drop for FaultTransport {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// The full event sequence a conforming job produces for `image`.
fn expected_events(image: &PackedImage) -> Vec<Event> {
    let mut expected = Vec::new();
    let mut packet = |bytes: Vec<u8>| {
        expected.push(Event::Write(bytes));
        expected.push(Event::Flush);
        expected.push(Event::Read);
    };

    for hex in INIT_PACKETS {
        packet(from_hex(hex));
    }

    let mut header = from_hex(RASTER_PREFIX);
    header.extend_from_slice(&(image.width_bytes as u16).to_le_bytes());
    header.extend_from_slice(&(image.height as u16).to_le_bytes());
    packet(header);
    packet(image.data.clone());
    packet(from_hex(FEED));

    expected
}

// ============================================================================
// WIRE SEQUENCING
// ============================================================================

#[test]
fn job_sends_exact_protocol_sequence() {
    let mut bitmap = Bitmap::blank(96, 16);
    for x in 0..96 {
        bitmap.set(x, 3, true);
    }
    let image = pack(&bitmap);

    let (transport, events) = RecordingTransport::new();
    PrintJob::new(transport).run(&image).unwrap();

    assert_eq!(*events.lock().unwrap(), expected_events(&image));
}

#[test]
fn every_write_is_followed_by_flush_and_read() {
    let image = pack(&Bitmap::blank(96, 88));
    let (transport, events) = RecordingTransport::new();
    PrintJob::new(transport).run(&image).unwrap();

    let events = events.lock().unwrap();
    // 9 packets: 6 init + header + payload + feed
    assert_eq!(events.len(), 27);
    for triple in events.chunks(3) {
        assert!(matches!(triple[0], Event::Write(_)));
        assert_eq!(triple[1], Event::Flush);
        assert_eq!(triple[2], Event::Read);
    }
}

#[test]
fn header_encodes_dimensions_little_endian() {
    // 768 dots -> 96 bytes per row, 300 rows: both fields need two bytes
    let image = pack(&Bitmap::blank(768, 300));
    let (transport, events) = RecordingTransport::new();
    PrintJob::new(transport).run(&image).unwrap();

    let events = events.lock().unwrap();
    let Event::Write(header) = &events[18] else {
        panic!("expected the raster header write");
    };
    let mut expected = from_hex(RASTER_PREFIX);
    expected.extend_from_slice(&[0x60, 0x00, 0x2C, 0x01]); // 96 LE, 300 LE
    assert_eq!(header, &expected);
}

// ============================================================================
// FAIL-FAST CHECKS
// ============================================================================

#[test]
fn oversized_width_is_rejected_before_any_io() {
    let image = PackedImage {
        width_bytes: 70_000,
        height: 1,
        data: vec![0; 70_000],
    };
    let (transport, events) = RecordingTransport::new();
    let err = PrintJob::new(transport).run(&image).unwrap_err();

    assert!(matches!(err, LabelError::ImageTooLarge { .. }));
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn oversized_height_is_rejected_before_any_io() {
    let image = PackedImage {
        width_bytes: 1,
        height: 70_000,
        data: vec![0; 70_000],
    };
    let (transport, events) = RecordingTransport::new();
    let err = PrintJob::new(transport).run(&image).unwrap_err();

    assert!(matches!(err, LabelError::ImageTooLarge { .. }));
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn payload_mismatch_is_rejected_before_any_io() {
    let image = PackedImage {
        width_bytes: 12,
        height: 16,
        data: vec![0; 100],
    };
    let (transport, events) = RecordingTransport::new();
    let err = PrintJob::new(transport).run(&image).unwrap_err();

    assert!(matches!(
        err,
        LabelError::PayloadMismatch {
            expected: 192,
            actual: 100,
        }
    ));
    assert!(events.lock().unwrap().is_empty());
}

// ============================================================================
// RESOURCE RELEASE
// ============================================================================

#[test]
fn transport_released_once_on_success() {
    let drops = Arc::new(AtomicUsize::new(0));
    let image = pack(&Bitmap::blank(96, 16));
    let transport = FaultTransport::new(usize::MAX, Arc::clone(&drops));

    PrintJob::new(transport).run(&image).unwrap();
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn transport_released_once_wherever_a_write_fails() {
    let image = pack(&Bitmap::blank(96, 16));

    // 9 writes total; fail each one in turn
    for n in 0..9 {
        let drops = Arc::new(AtomicUsize::new(0));
        let transport = FaultTransport::new(n, Arc::clone(&drops));

        let err = PrintJob::new(transport).run(&image).unwrap_err();
        assert!(
            matches!(err, LabelError::Transport { .. }),
            "write {}: unexpected error {:?}",
            n,
            err
        );
        assert_eq!(drops.load(Ordering::SeqCst), 1, "write {}", n);
    }
}

#[test]
fn transport_errors_carry_the_failing_phase() {
    let image = pack(&Bitmap::blank(96, 16));
    let cases = [
        (0, Phase::Initializing),
        (5, Phase::Initializing),
        (6, Phase::Transmitting), // raster header
        (7, Phase::Transmitting), // payload
        (8, Phase::Feeding),
    ];

    for (n, want) in cases {
        let drops = Arc::new(AtomicUsize::new(0));
        let transport = FaultTransport::new(n, Arc::clone(&drops));
        let err = PrintJob::new(transport).run(&image).unwrap_err();

        match err {
            LabelError::Transport { phase, .. } => {
                assert_eq!(phase, want, "write {}", n);
            }
            other => panic!("write {}: unexpected error {:?}", n, other),
        }
    }
}

// ============================================================================
// FULL PIPELINE (requires a host font; skipped when none is installed)
// ============================================================================

/// Resolve any installed family so pipeline tests can use real glyphs.
fn any_host_family() -> Option<String> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    db.faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
}

#[test]
fn rendered_label_prints_with_consistent_frame() {
    let Some(family) = any_host_family() else {
        eprintln!("no system fonts installed; skipping");
        return;
    };
    let config = PrinterConfig::P12;

    let spec = StyleSpec::new("AB", family, 16);
    let bitmap = render::render(&spec, config.canvas_height).unwrap();
    assert_eq!(bitmap.height, config.canvas_height);
    assert!(bitmap.width > 0);

    // Rotate into feed orientation and fit the 96-dot head
    let label = bitmap.rotate_cw().fit_width(config.dots_per_line as u32);
    assert_eq!(label.width, config.dots_per_line as u32);
    assert_eq!(label.height, bitmap.width);

    let image = pack(&label);
    assert_eq!(image.width_bytes, config.dots_per_line as u32 / 8);
    assert_eq!(
        image.data.len(),
        (image.width_bytes * image.height) as usize
    );

    let (transport, events) = RecordingTransport::new();
    PrintJob::new(transport).run(&image).unwrap();
    assert_eq!(*events.lock().unwrap(), expected_events(&image));
}

#[test]
fn short_text_header_declares_measured_dimensions() {
    let Some(family) = any_host_family() else {
        eprintln!("no system fonts installed; skipping");
        return;
    };

    // A 24-dot canvas printed in composition orientation: the header must
    // declare exactly what the rasterizer measured.
    let bitmap = render::render(&StyleSpec::new("AB", family, 16), 24).unwrap();
    let image = pack(&bitmap);
    let width_bytes = bitmap.width.div_ceil(8) as u16;
    assert_eq!(image.data.len(), width_bytes as usize * 24);

    let (transport, events) = RecordingTransport::new();
    PrintJob::new(transport).run(&image).unwrap();

    let events = events.lock().unwrap();
    let Event::Write(header) = &events[18] else {
        panic!("expected the raster header write");
    };
    let mut expected = from_hex(RASTER_PREFIX);
    expected.extend_from_slice(&width_bytes.to_le_bytes());
    expected.extend_from_slice(&[0x18, 0x00]); // height 24
    assert_eq!(header, &expected);

    let Event::Write(payload) = &events[21] else {
        panic!("expected the payload write");
    };
    assert_eq!(payload, &image.data);
}

#[test]
fn pbm_artifact_round_trips_through_the_print_path() {
    let Some(family) = any_host_family() else {
        eprintln!("no system fonts installed; skipping");
        return;
    };

    let spec = StyleSpec::new("Pantry", family, 16);
    let rotated = render::render(&spec, 88).unwrap().rotate_cw();

    let dir = std::env::temp_dir().join("p12-label-pbm-roundtrip");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("label.pbm");

    p12_label::pbm::write(&rotated, &path).unwrap();
    let reloaded = p12_label::pbm::read(&path).unwrap();
    assert_eq!(reloaded, rotated);
}
