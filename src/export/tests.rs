use image::RgbImage;

use crate::annotate::{Command, CountingEngine, HistoryManager, Marker, MarkerStore, RoiStore};
use crate::model::{CellTypeConfig, MarkerShape, Point};

use super::{annotations_json, counts_csv, parse_annotations, render_overlay};

struct Fixture {
    config: CellTypeConfig,
    markers: MarkerStore,
    rois: RoiStore,
}

fn fixture() -> Fixture {
    let mut config = CellTypeConfig::new();
    let type_a = config.add("A", [255, 0, 0], MarkerShape::Circle, 8);
    let type_b = config.add("B", [0, 0, 255], MarkerShape::Cross, 8);

    let mut markers = MarkerStore::new();
    let mut history = HistoryManager::new();
    for (x, y, type_id) in [(1.0, 1.0, type_a), (5.0, 5.0, type_a), (2.0, 2.0, type_b)] {
        let marker = Marker {
            id: markers.allocate_id(),
            position: Point::new(x, y),
            type_id,
        };
        history
            .record(&mut markers, Command::AddMarker(marker))
            .expect("record");
    }

    let mut rois = RoiStore::new();
    let roi_id = rois.begin("cortex");
    for (x, y) in [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)] {
        rois.add_vertex(roi_id, Point::new(x, y)).expect("vertex");
    }
    rois.close(roi_id).expect("close");
    CountingEngine.recompute_all(&mut rois, &markers, &config);

    Fixture {
        config,
        markers,
        rois,
    }
}

#[test]
fn csv_lists_every_roi_and_type_pair_in_order() {
    let fixture = fixture();
    let rendered = counts_csv(&fixture.rois, &fixture.config).expect("csv");
    let lines = rendered.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "ROI,CellType,Count");
    assert_eq!(lines[1], "cortex,A,1");
    assert_eq!(lines[2], "cortex,B,1");
    assert_eq!(lines.len(), 3);
}

#[test]
fn open_rois_are_not_exported() {
    let mut fixture = fixture();
    let open_id = fixture.rois.begin("unfinished");
    fixture
        .rois
        .add_vertex(open_id, Point::new(0.0, 0.0))
        .expect("vertex");
    let rendered = counts_csv(&fixture.rois, &fixture.config).expect("csv");
    assert!(!rendered.contains("unfinished"));

    let document = annotations_json(None, &fixture.markers, &fixture.rois, &fixture.config)
        .expect("json");
    assert!(!document.contains("unfinished"));
}

#[test]
fn json_document_round_trips() {
    let fixture = fixture();
    let rendered =
        annotations_json(None, &fixture.markers, &fixture.rois, &fixture.config).expect("json");
    let document = parse_annotations(&rendered).expect("parse");

    assert_eq!(document.markers.len(), 3);
    assert_eq!(document.markers[0].cell_type, "A");
    assert_eq!(document.rois.len(), 1);
    assert_eq!(document.rois[0].vertices.len(), 4);
    assert_eq!(document.counts.len(), 2);
    assert_eq!(document.counts[0].roi, "cortex");
    assert_eq!(document.counts[0].count, 1);
}

#[test]
fn documents_with_degenerate_rois_are_rejected() {
    let raw = r#"{
        "markers": [],
        "rois": [{"id": 0, "label": "thin", "vertices": [[0.0, 0.0], [1.0, 1.0]]}],
        "counts": []
    }"#;
    let error = parse_annotations(raw).expect_err("degenerate roi");
    assert!(error.to_string().contains("thin"));
}

#[test]
fn overlay_keeps_dimensions_and_draws_annotations() {
    let fixture = fixture();
    let composite = RgbImage::new(16, 16);
    let overlay = render_overlay(&composite, &fixture.markers, &fixture.rois, &fixture.config);
    assert_eq!(overlay.dimensions(), (16, 16));

    // ROI outline passes through (3, 0); marker B's cross covers (2, 2).
    assert_eq!(overlay.get_pixel(3, 0).0, [255, 255, 0]);
    assert_eq!(overlay.get_pixel(2, 2).0, [0, 0, 255]);
}

#[test]
fn exports_do_not_mutate_engine_state() {
    let fixture = fixture();
    let markers_before = fixture.markers.all().to_vec();
    let counts_before = fixture.rois.all()[0].counts().clone();
    counts_csv(&fixture.rois, &fixture.config).expect("csv");
    annotations_json(None, &fixture.markers, &fixture.rois, &fixture.config).expect("json");
    render_overlay(
        &RgbImage::new(8, 8),
        &fixture.markers,
        &fixture.rois,
        &fixture.config,
    );
    assert_eq!(fixture.markers.all(), markers_before.as_slice());
    assert_eq!(fixture.rois.all()[0].counts(), &counts_before);
}
