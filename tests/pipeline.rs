extern crate escapetime;
extern crate num;

use escapetime::color::{BLACK, BLUE, GREEN, RED, YELLOW};
use escapetime::{escape_time, trace, ColorRamp, Error, GridSpec, Palette, Renderer};
use num::Complex;

#[test]
fn inside_point_gets_the_last_entry() {
    let ramp = ColorRamp::for_iterations(&Palette::Classic.anchors(), 50).unwrap();
    let escape = escape_time(Complex::new(-1.0, 0.0), 50).unwrap();
    assert_eq!(escape, 50);
    assert_eq!(ramp.color_for(escape), Ok(RED));
}

#[test]
fn escaping_point_gets_an_early_entry() {
    let ramp = ColorRamp::for_iterations(&[BLACK, BLUE, GREEN, YELLOW, RED], 50).unwrap();
    let escape = escape_time(Complex::new(0.5, 0.5), 50).unwrap();
    assert!(escape < 10);
    let color = ramp.color_for(escape).unwrap();
    assert_eq!(color, ramp.table()[escape]);
}

#[test]
fn every_escape_time_has_a_color() {
    let grid = GridSpec::new((-2.0, 2.0), (-2.0, 2.0), 0.1).unwrap();
    let renderer = Renderer::new(grid, 30).unwrap();
    let ramp = ColorRamp::for_iterations(&Palette::Fire.anchors(), 30).unwrap();
    for escape in renderer.escape_times(3).unwrap() {
        assert!(ramp.color_for(escape).is_ok());
    }
}

#[test]
fn trace_narrates_what_the_grid_computes() {
    let grid = GridSpec::new((-2.0, 1.0), (-1.0, 1.0), 0.25).unwrap();
    let renderer = Renderer::new(grid, 10).unwrap();
    let escapes = renderer.escape_times_single();
    for (pixel, c) in grid.samples() {
        let steps = trace(c, 10);
        let escape = escapes[grid.pixel_to_offset(&pixel)];
        if escape < 10 {
            assert_eq!(steps.len(), escape + 1);
        } else {
            assert_eq!(steps.len(), 10);
        }
    }
}

#[test]
fn ramp_built_for_a_smaller_cap_is_a_caller_error() {
    let ramp = ColorRamp::for_iterations(&Palette::Grayscale.anchors(), 5).unwrap();
    match ramp.color_for(50) {
        Err(Error::IndexOutOfRange { index, len }) => {
            assert_eq!(index, 50);
            assert_eq!(len, 6);
        }
        other => panic!("unexpected {:?}", other),
    }
}
