use std::sync::Arc;

use demo_deck::engine::{DemoEngine, TypingLock};
use demo_deck::utils::{AppInstant, ms, now};
use demo_deck::{DemoOrchestrator, NavKey, ScenarioCatalog, Transition, WidgetId};

fn builtin() -> Arc<ScenarioCatalog> {
    Arc::new(ScenarioCatalog::builtin())
}

/// Drives the engine in 50 ms frames, the cadence of the dashboard.
fn run_until(engine: &mut DemoEngine, from: AppInstant, until: AppInstant) {
    let mut t = from;
    while t < until {
        t += ms(50);
        engine.update(t);
    }
}

#[test]
fn keyboard_walkthrough_of_onboarding_care() {
    let mut demo = DemoOrchestrator::new(builtin());

    assert_eq!(demo.start("onboarding-care"), Transition::Applied);
    assert_eq!(demo.state().current_step, 0);
    assert!(demo.is_playing());

    assert_eq!(demo.handle_key(NavKey::ArrowRight), Transition::Applied);
    assert_eq!(demo.handle_key(NavKey::Space), Transition::Applied);
    assert_eq!(demo.state().current_step, 2);
    assert!(demo.is_playing());

    // Acknowledging the last step ends playback
    assert_eq!(demo.handle_key(NavKey::ArrowRight), Transition::Finished);
    assert!(!demo.is_playing());
    assert_eq!(
        demo.state().completed_steps,
        vec!["adam-greeting", "joe-response", "adam-integration"]
    );

    assert_eq!(demo.handle_key(NavKey::Escape), Transition::Applied);
    assert_eq!(demo.state().current_step, 0);
    assert!(demo.state().completed_steps.is_empty());
}

#[test]
fn typing_lock_blocks_navigation() {
    let mut demo = DemoOrchestrator::new(builtin());
    demo.start("crisis-prevention");

    demo.set_typing(true);
    assert_eq!(demo.advance(), Transition::IgnoredTypingLock);
    assert_eq!(demo.previous(), Transition::IgnoredTypingLock);
    assert_eq!(demo.state().current_step, 0);

    demo.set_typing(false);
    assert_eq!(demo.advance(), Transition::Applied);
    assert_eq!(demo.state().current_step, 1);
}

#[test]
fn engine_plays_every_builtin_scenario_with_autoplay() {
    let catalog = builtin();
    for scenario in catalog.scenarios() {
        let t0 = now();
        let mut engine = DemoEngine::new(catalog.clone(), Some(11), t0);
        engine.set_autoplay(Some(ms(300)));
        assert_eq!(engine.start_scenario(&scenario.id), Transition::Applied);

        run_until(&mut engine, t0, t0 + ms(180_000));

        assert!(engine.is_finished(), "{} did not finish", scenario.id);
        assert_eq!(engine.state().completed_steps.len(), scenario.len());
        // Greeting plus one message per step
        assert_eq!(engine.messages().len(), scenario.len() + 1);
        for (message, step) in engine.messages()[1..].iter().zip(&scenario.steps) {
            assert_eq!(message.content, step.content);
            assert_eq!(message.actor, step.kind);
        }
        assert!(engine.can_chat());
    }
}

#[test]
fn custom_catalog_from_json() {
    let json = r#"[
        {
            "id": "pitch",
            "title": "Pitch",
            "description": "Two lines",
            "steps": [
                { "id": "a", "type": "user_message", "content": "Hi Adam", "typingSpeed": "human", "delay": 0 },
                { "id": "b", "type": "ai_message", "content": "Hello Joe", "delay": 100 }
            ]
        }
    ]"#;
    let catalog = Arc::new(ScenarioCatalog::from_json_str(json).unwrap());

    let t0 = now();
    let mut engine = DemoEngine::new(catalog, Some(1), t0);
    engine.start_scenario("pitch");
    run_until(&mut engine, t0, t0 + ms(5_000));
    assert_eq!(engine.messages().last().unwrap().content, "Hi Adam");

    assert_eq!(engine.handle_key(NavKey::ArrowRight), Transition::Applied);
    run_until(&mut engine, t0 + ms(5_000), t0 + ms(10_000));
    assert_eq!(engine.messages().last().unwrap().content, "Hello Joe");

    assert_eq!(engine.handle_key(NavKey::ArrowRight), Transition::Finished);
    assert!(engine.is_finished());
}

#[test]
fn hovered_stack_holds_still_during_playback() {
    let t0 = now();
    let mut engine = DemoEngine::new(builtin(), Some(3), t0);
    engine.widgets.hover_start(WidgetId::Churn);
    let index = engine.widgets.index(WidgetId::Churn);

    engine.start_scenario("morning-synthesis");
    run_until(&mut engine, t0, t0 + ms(30_000));
    assert_eq!(engine.widgets.index(WidgetId::Churn), index);

    engine.widgets.hover_end(WidgetId::Churn, t0 + ms(30_000));
    engine.dispose();
    assert_eq!(engine.widgets.active_timer_count(), 0);
}
