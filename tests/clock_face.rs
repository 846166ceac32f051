use clockface::text::ApproximateMetrics;
use clockface::{
    measure, Affine, Canvas, ClockFace, ClockStyle, Color, DrawCommand, FixedTime, MeasureSpec,
    TimeSample, TimeSource,
};

fn pointer_rotations(face: &ClockFace, time: TimeSample) -> Vec<f64> {
    let scene = face.render(time, &ApproximateMetrics);
    let rotations: Vec<f64> = scene
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Rotate { degrees } => Some(*degrees),
            _ => None,
        })
        .collect();
    rotations[rotations.len() - 3..].to_vec()
}

#[test]
fn negotiated_face_renders_pointer_angles() {
    let m = measure(MeasureSpec::AtMost(80), MeasureSpec::Unspecified, None, 400);
    assert!(m.size <= 80);

    let face = ClockFace::from_measurement(&m, ClockStyle::default());
    assert_eq!(face.scale(), m.radius as f64 / 200.0);

    let time = TimeSample::new(21, 45, 12).unwrap();
    let expected = [292.5, 271.2, 72.0];
    for (got, want) in pointer_rotations(&face, time).iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
}

#[test]
fn midnight_pointers_stack_at_twelve() {
    let face = ClockFace::new(200.0, ClockStyle::default());
    let source = FixedTime(TimeSample::new(0, 0, 0).unwrap());
    assert_eq!(pointer_rotations(&face, source.now()), vec![0.0, 0.0, 0.0]);
}

#[test]
fn exact_constraints_paint_a_centered_face() {
    let m = measure(MeasureSpec::Exact(150), MeasureSpec::Exact(150), None, 400);
    assert_eq!(m.size, 150);
    let face = ClockFace::from_measurement(&m, ClockStyle::default());
    let scene = face.render(TimeSample::new(0, 0, 15).unwrap(), &ApproximateMetrics);

    let mut frame = vec![0u8; 150 * 150 * 4];
    let mut canvas = Canvas::new(&mut frame, 150, 150).unwrap();
    canvas.clear(Color::WHITE);
    canvas.draw_scene(&scene, Affine::IDENTITY);

    // second 15 points the red pointer at 3 o'clock
    let [r, g, b, _] = canvas.pixel(80, 75).unwrap();
    assert_eq!((r, g, b), (0xff, 0x00, 0x00));
    // nothing is drawn in the corners outside the ring
    assert_eq!(canvas.pixel(2, 2), Some([0xff, 0xff, 0xff, 0xff]));
}
