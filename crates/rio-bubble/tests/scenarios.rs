//! End-to-end scenarios across the coordinator and the frame sampler.

use kurbo::Size;
use pretty_assertions::assert_eq;
use rio_bubble::{
    compute_diameters, BubbleAnimationState, BubbleConfig, BubbleEngine, BubbleType, TransitionCoordinator,
    NATIVE_GRACE_PERIOD,
};

const BUBBLE: Size = Size::new(140.0, 48.0);
const CORNER: f64 = 20.0;

#[test]
fn test_reference_packing() {
    let first = compute_diameters(100.0, 10.0, 20.0, 42);
    let second = compute_diameters(100.0, 10.0, 20.0, 42);

    assert_eq!(first, second);
    assert!((first.sum() - 100.0).abs() <= 0.5);
    assert!(first.diameters.iter().all(|&d| (10.0..=20.0).contains(&d)));
}

#[test]
fn test_thinking_to_read_explodes() {
    let config = BubbleConfig::default();
    let t0 = 12.5;
    let state = BubbleAnimationState::transition(BubbleType::Thinking, BubbleType::Read, t0);

    assert_eq!(state, BubbleAnimationState::Exploding { start_time: t0 });
    for step in 0..=10 {
        let now = t0 + config.explosion_duration * step as f64 / 10.0;
        assert_eq!(state.morph_progress(now, &config), 0.0);
    }
    assert_eq!(state.animation_progress(t0 + config.explosion_duration, &config), 1.0);
}

#[test]
fn test_every_animated_state_converges_to_idle() {
    let config = BubbleConfig::default();
    for from in BubbleType::ALL {
        for to in BubbleType::ALL {
            let mut c = TransitionCoordinator::new(from, config.clone());
            c.start_transition(from, to, 3.0);
            let end = 3.0 + c.state().duration(&config);

            assert!(c.state().is_complete(end, &config), "{from} → {to}");
            assert_eq!(c.current_state(end), BubbleAnimationState::Idle(to), "{from} → {to}");

            c.poll(end);
            assert_eq!(c.state(), BubbleAnimationState::Idle(to), "{from} → {to}");
            assert_eq!(c.displayed_type(end), to, "{from} → {to}");
        }
    }
}

#[test]
fn test_second_transition_wins() {
    let config = BubbleConfig::default();
    let horizon = 10.0;

    // Each first transition queues delayed effects; the second must erase them.
    let cases = [
        (BubbleType::Thinking, BubbleType::Read, BubbleType::Thinking),
        (BubbleType::Thinking, BubbleType::Talking, BubbleType::Thinking),
        (BubbleType::Read, BubbleType::Talking, BubbleType::Read),
        (BubbleType::Thinking, BubbleType::Read, BubbleType::Talking),
    ];

    for (start, first, second) in cases {
        let mut both = TransitionCoordinator::new(start, config.clone());
        both.start_transition(start, first, 0.0);
        both.start_transition(first, second, 0.01);

        let mut only = TransitionCoordinator::new(first, config.clone());
        only.start_transition(first, second, 0.01);

        for now in [0.5, 1.0, horizon] {
            assert_eq!(both.displayed_type(now), only.displayed_type(now), "{start}→{first}→{second} @ {now}");
            assert_eq!(both.can_use_native(now), only.can_use_native(now), "{start}→{first}→{second} @ {now}");
        }

        both.poll(horizon);
        only.poll(horizon);
        assert_eq!(both.displayed_type(horizon), only.displayed_type(horizon));
        assert_eq!(both.can_use_native(horizon), only.can_use_native(horizon));
        assert_eq!(both.state(), only.state());
    }
}

#[test]
fn test_polled_and_lazy_agree() {
    let config = BubbleConfig::default();
    let mut polled = TransitionCoordinator::new(BubbleType::Thinking, config.clone());
    let mut lazy = TransitionCoordinator::new(BubbleType::Thinking, config.clone());
    polled.start_transition(BubbleType::Thinking, BubbleType::Talking, 0.0);
    lazy.start_transition(BubbleType::Thinking, BubbleType::Talking, 0.0);

    let mut now = 0.0;
    while now < config.morph_duration + NATIVE_GRACE_PERIOD + 0.5 {
        polled.poll(now);
        assert_eq!(polled.current_state(now), lazy.current_state(now));
        assert_eq!(polled.can_use_native(now), lazy.can_use_native(now));
        assert_eq!(polled.displayed_type(now), lazy.displayed_type(now));
        assert_eq!(polled.morph_progress(now), lazy.morph_progress(now));
        now += 1.0 / 60.0;
    }
}

#[test]
fn test_full_conversation_cycle() {
    let config = BubbleConfig::default();
    let mut engine = BubbleEngine::new(BubbleType::Read, config.clone());
    engine.configure(BUBBLE, CORNER, BubbleType::Read, 0.0);
    assert!(engine.sample_frame(0.0).circles.is_empty());

    // Peer starts thinking: bubble grows from a dot
    engine.configure(BUBBLE, CORNER, BubbleType::Thinking, 1.0);
    let growing = engine.sample_frame(1.0 + config.read_to_thinking_duration / 2.0);
    assert!(growing.is_scaling);
    assert!(growing.rectangle_size.width < BUBBLE.width);

    // Settled thinking
    let settled_at = 1.0 + config.read_to_thinking_duration + config.circle_transition_duration;
    let thinking = engine.sample_frame(settled_at);
    assert!(!thinking.is_scaling);
    assert_eq!(thinking.rectangle_size, BUBBLE);
    assert_eq!(thinking.circles.len(), engine.packing().diameters.len());
    assert!(!thinking.can_use_native);

    // Peer starts typing: morph toward the talking pose
    let talk_at = settled_at + 1.0;
    engine.configure(BUBBLE, CORNER, BubbleType::Talking, talk_at);
    let morphing = engine.sample_frame(talk_at + config.morph_duration / 2.0);
    assert!(morphing.morph_progress > 0.0 && morphing.morph_progress < 1.0);
    let full: f64 = thinking.circles.iter().map(|c| c.diameter).sum();
    let shrunk: f64 = morphing.circles.iter().map(|c| c.diameter).sum();
    assert!(shrunk < full);

    let talking = engine.sample_frame(talk_at + config.morph_duration + NATIVE_GRACE_PERIOD);
    assert_eq!(talking.morph_progress, 1.0);
    assert!(talking.circles.is_empty());
    assert!(talking.can_use_native);

    // Message delivered and read: talking → read is instant
    let read_at = talk_at + 5.0;
    engine.configure(BUBBLE, CORNER, BubbleType::Read, read_at);
    let read = engine.sample_frame(read_at);
    assert_eq!(read.displayed_type, BubbleType::Read);
    assert_eq!(read.rectangle_size, Size::ZERO);
    assert!(!read.can_use_native);
}
