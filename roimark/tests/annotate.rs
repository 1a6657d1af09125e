use image::Rgb;
use roimark::test_helpers::test_image;
use roimark::tracing_setup::init_tracing_for_tests;
use roimark::{
    read_image, AnnotationSession, Cfg, CoordGroups, Mode, RasterSurface, ShapeI, TextOutput,
    COLOR_COMPLETE,
};
use std::fs;

type RasterSession = AnnotationSession<RasterSurface, TextOutput, CoordGroups>;

fn make_session() -> RasterSession {
    init_tracing_for_tests();
    let mut session = AnnotationSession::new(
        RasterSurface::new(ShapeI::new(1, 1)),
        TextOutput::new(),
        CoordGroups::new(),
        Cfg::default(),
    );
    session.replace_image(test_image());
    session
}

#[test]
fn test_annotate_scenario() {
    let mut session = make_session();
    // 1600x800 is displayed as 800x400
    assert_eq!(session.surface().shape(), ShapeI::new(800, 400));
    assert_eq!(*session.surface().image().get_pixel(50, 300), Rgb([60, 60, 60]));

    // a triangular region
    for pos in [(100.0, 100.0), (200.0, 100.0), (150.0, 200.0)] {
        session.click(pos.into()).unwrap();
    }
    session.right_click().unwrap();
    assert_eq!(
        session.output().lines(),
        &["roi-P1=200;200;400;200;300;400;"]
    );
    // vertex disks and boundary render in the completed color
    assert_eq!(
        *session.surface().image().get_pixel(100, 100),
        Rgb(COLOR_COMPLETE)
    );
    assert_eq!(
        *session.surface().image().get_pixel(150, 100),
        Rgb(COLOR_COMPLETE)
    );

    // switching the mode drops the region work entirely
    session.set_mode(Mode::LineCrossing);
    assert!(session.output().lines().is_empty());
    assert_eq!(*session.surface().image().get_pixel(100, 100), Rgb([60, 60, 60]));

    for pos in [
        (300.0, 100.0),
        (400.0, 100.0),
        (300.0, 200.0),
        (400.0, 200.0),
    ] {
        session.click(pos.into()).unwrap();
    }
    // completes on the 4th point without a right click
    assert!(!session.is_capturing());
    assert_eq!(
        session.output().lines(),
        &["line-crossing-P1=600;400;800;400;600;200;800;200;"]
    );
    assert_eq!(
        *session.surface().image().get_pixel(300, 200),
        Rgb(COLOR_COMPLETE)
    );
    assert_eq!(session.output().to_config(), session.output().lines()[0]);
}

#[test]
fn test_read_image_roundtrip() {
    init_tracing_for_tests();
    let tmp_file = std::env::temp_dir().join("roimark-reference.png");
    test_image().save(&tmp_file).unwrap();
    let im = read_image(&tmp_file).unwrap();
    assert_eq!(ShapeI::from_im(&im), ShapeI::new(1600, 800));
    fs::remove_file(&tmp_file).unwrap();
}
