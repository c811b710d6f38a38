use collage_wasm::add_control::{AddPhotoControl, ButtonStyle, Rgb, Shadow};

#[test]
fn enabled_tracks_last_refresh() {
    let mut control = AddPhotoControl::new(250.0);
    assert!(!control.is_enabled());

    for (step, pending) in [true, true, false, true, false, false].into_iter().enumerate() {
        control.refresh(pending, step as f64 * 10.0);
        assert_eq!(control.is_enabled(), pending, "step {step}");
    }
}

#[test]
fn refresh_converges_to_target_style() {
    let mut control = AddPhotoControl::new(250.0);
    control.refresh(true, 0.0);
    assert!(!control.is_settled(100.0));
    assert_eq!(control.style_at(250.0), ButtonStyle::ENABLED);

    control.refresh(false, 1000.0);
    assert_eq!(control.style_at(1250.0), ButtonStyle::DISABLED);
}

#[test]
fn repeated_refresh_restarts_but_lands_in_the_same_place() {
    let mut control = AddPhotoControl::new(250.0);
    control.refresh(true, 0.0);
    control.refresh(true, 100.0);
    control.refresh(true, 200.0);
    assert!(!control.is_settled(300.0));
    assert_eq!(control.style_at(450.0), ButtonStyle::ENABLED);
}

#[test]
fn interrupted_tween_starts_from_what_is_shown() {
    let mut control = AddPhotoControl::new(250.0);
    control.refresh(true, 0.0);
    let mid = control.style_at(125.0);
    control.refresh(false, 125.0);
    assert_eq!(control.style_at(125.0), mid);
    assert!(mid.opacity > 0.5 && mid.opacity < 1.0);
}

#[test]
fn styles_match_the_page() {
    assert_eq!(ButtonStyle::for_pending(false).opacity, 0.5);
    assert_eq!(ButtonStyle::for_pending(false).scale, 0.9);
    assert_eq!(ButtonStyle::for_pending(true).scale, 1.0);
    assert_eq!(Rgb::NEUTRAL.to_css(), "rgb(224, 224, 224)");
    assert_eq!(ButtonStyle::ENABLED.background.to_css(), "rgb(255, 255, 255)");
    assert_eq!(Shadow::NONE.to_css(), "none");
    assert_eq!(ButtonStyle::ENABLED.shadow.to_css(), "0 0 3px rgba(0, 0, 0, 1.000)");
}
