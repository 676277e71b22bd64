//! End-to-end pipeline test: files in, merged files out.
//!
//! Exercises the worked example from the library docs: four 2x2 quadrant
//! captures with one annotation at (1,1) each merge into a 4x4 scene with
//! points at (1,1), (3,1), (1,3), (3,3).

use std::fs;
use std::path::PathBuf;

use image::{GrayImage, Luma, Rgb, RgbImage};
use tempfile::TempDir;

use quadmerge::{run, AnnotationSet, FrameSize, Point, ReconstructRequest};

struct Fixture {
    _dir: TempDir,
    request: ReconstructRequest,
}

fn quadrant_fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let mut primary: Vec<PathBuf> = Vec::new();
    let mut thermal: Vec<PathBuf> = Vec::new();
    let mut annotations: Vec<PathBuf> = Vec::new();

    for i in 0..4u8 {
        // Distinct fill per quadrant so placement is checkable after decode.
        let rgb_path = dir.path().join(format!("image{}.png", i + 1));
        RgbImage::from_pixel(2, 2, Rgb([40 * (i + 1), 10, 10]))
            .save(&rgb_path)
            .unwrap();
        primary.push(rgb_path);

        let tir_path = dir.path().join(format!("tir{}.png", i + 1));
        GrayImage::from_pixel(2, 2, Luma([50 * (i + 1)]))
            .save(&tir_path)
            .unwrap();
        thermal.push(tir_path);

        let xml_path = dir.path().join(format!("annotation{}.xml", i + 1));
        fs::write(
            &xml_path,
            format!(
                "<annotation>\
                 <size><width>2</width><height>2</height><depth>3</depth></size>\
                 <object><name>target-{i}</name><pose>unknown</pose>\
                 <point><x>1</x><y>1</y></point></object>\
                 </annotation>"
            ),
        )
        .unwrap();
        annotations.push(xml_path);
    }

    let request = ReconstructRequest::new(
        primary.try_into().unwrap(),
        thermal.try_into().unwrap(),
        annotations.try_into().unwrap(),
        dir.path().join("reconstructed_image.png"),
        dir.path().join("reconstructed_tir.png"),
        dir.path().join("reconstructed_annotation.xml"),
    );
    Fixture { _dir: dir, request }
}

#[test]
fn merges_quadrant_files_into_one_scene() {
    let fixture = quadrant_fixture();
    let report = run(&fixture.request).unwrap();

    assert_eq!(report.width, 4);
    assert_eq!(report.height, 4);
    assert_eq!(report.objects, 4);

    // Both mosaics double each dimension and keep quadrant pixels in place.
    let primary = image::open(&fixture.request.output_primary)
        .unwrap()
        .to_rgb8();
    assert_eq!(primary.dimensions(), (4, 4));
    assert_eq!(primary.get_pixel(1, 1).0, [40, 10, 10]);
    assert_eq!(primary.get_pixel(2, 0).0, [80, 10, 10]);
    assert_eq!(primary.get_pixel(0, 3).0, [120, 10, 10]);
    assert_eq!(primary.get_pixel(3, 2).0, [160, 10, 10]);

    let thermal = image::open(&fixture.request.output_thermal)
        .unwrap()
        .to_luma8();
    assert_eq!(thermal.dimensions(), (4, 4));
    assert_eq!(thermal.get_pixel(0, 0).0, [50]);
    assert_eq!(thermal.get_pixel(3, 0).0, [100]);
    assert_eq!(thermal.get_pixel(0, 3).0, [150]);
    assert_eq!(thermal.get_pixel(3, 3).0, [200]);

    // The merged annotation document: size block (4,4,3), quadrant order,
    // opaque fields intact, points remapped.
    let document = fs::read_to_string(&fixture.request.output_annotations).unwrap();
    let merged = AnnotationSet::from_xml_str(&document).unwrap();
    assert_eq!(merged.frame(), Some(FrameSize::new(4, 4, 3)));

    let points: Vec<Point> = merged.objects().iter().map(|o| o.point()).collect();
    assert_eq!(
        points,
        vec![
            Point { x: 1, y: 1 },
            Point { x: 3, y: 1 },
            Point { x: 1, y: 3 },
            Point { x: 3, y: 3 },
        ]
    );

    let names: Vec<String> = merged
        .objects()
        .iter()
        .map(|o| o.element().child("name").unwrap().text())
        .collect();
    assert_eq!(names, ["target-0", "target-1", "target-2", "target-3"]);
    assert!(document.contains("<pose>unknown</pose>"));
}

#[test]
fn mismatched_quadrant_produces_no_output() {
    let fixture = quadrant_fixture();
    RgbImage::new(3, 2).save(&fixture.request.primary[2]).unwrap();

    run(&fixture.request).unwrap_err();

    assert!(!fixture.request.output_primary.exists());
    assert!(!fixture.request.output_thermal.exists());
    assert!(!fixture.request.output_annotations.exists());
}
