use std::rc::Rc;

use stepper_core::{DecimalFormat, StepperConfig, Subscription};
use stepper_ui::{EventOutcome, Stepper, StepperEvent, StepperView, segment_at};

const FIELD_WIDTH: f32 = 120.0;

fn show(name: &str, view: &StepperView) {
    let r = view.render_state();
    let fill = r
        .fraction
        .map(|f| format!("{:.0}%", f * 100.0))
        .unwrap_or_else(|| "-".into());
    log::info!(
        "[{name}] text={:?}{} fill={fill} up={} down={}",
        r.text,
        if r.is_placeholder { " (placeholder)" } else { "" },
        r.increment_enabled,
        r.decrement_enabled,
    );
}

fn run(name: &str, view: &mut StepperView, events: Vec<StepperEvent>) {
    for event in events {
        let label = format!("{event:?}");
        match view.handle(event) {
            EventOutcome::Rejected(e) => log::warn!("[{name}] {label} rejected: {e}"),
            EventOutcome::Reverted(e) => log::warn!("[{name}] {label} reverted: {e}"),
            outcome => log::info!("[{name}] {label} -> {outcome:?}"),
        }
    }
    show(name, view);
}

/// Attach a delegate and one publisher subscriber that both log.
fn observe(name: &'static str, view: &mut StepperView) -> Subscription<Option<f64>> {
    view.controller_mut()
        .set_delegate(move |value: Option<f64>| log::info!("[{name}] delegate saw {value:?}"));
    view.controller()
        .subscribe(move |value| log::info!("[{name}] publisher saw {value:?}"))
}

fn typed(text: &str) -> impl Iterator<Item = StepperEvent> + '_ {
    text.chars().map(|c| StepperEvent::Insert(c.to_string()))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // whole numbers, 0..=100
    let mut percent = Stepper(StepperConfig::new().range(0.0, 100.0).initial_value(Some(23.0)))?
        .label("Percent");
    let _percent_sub = observe("percent", &mut percent);

    show("percent", &percent);
    let mut script = vec![
        segment_at(FIELD_WIDTH - 4.0, FIELD_WIDTH)
            .map(|s| s.press_event())
            .unwrap_or(StepperEvent::IncrementPressed),
        StepperEvent::FocusGained,
    ];
    script.extend(typed("150"));
    script.push(StepperEvent::Commit);
    run("percent", &mut percent, script);

    // one fraction digit, half steps
    let mut offset = Stepper(
        StepperConfig::new()
            .range(-10.0, 10.0)
            .increment(0.5)
            .initial_value(Some(9.0))
            .allows_empty(false)
            .formatter(Rc::new(DecimalFormat::new().fraction_digits(1, 1))),
    )?
    .label("Offset");
    let _offset_sub = observe("offset", &mut offset);
    show("offset", &offset);
    run(
        "offset",
        &mut offset,
        vec![
            StepperEvent::IncrementPressed,
            StepperEvent::IncrementPressed,
            StepperEvent::IncrementPressed,
            StepperEvent::FocusGained,
            StepperEvent::Backspace,
            StepperEvent::Commit,
        ],
    );

    // unbounded and optional
    let mut spacing = Stepper(StepperConfig::new().placeholder("inherited"))?.label("Spacing");
    let _spacing_sub = observe("spacing", &mut spacing);
    let publisher = spacing.controller().publisher();
    let _inherited_sub = publisher.subscribe(|value| {
        if value.is_none() {
            log::info!("[spacing] back to inherited");
        }
    });
    show("spacing", &spacing);

    let mut script = vec![StepperEvent::FocusGained];
    script.extend(typed("1234"));
    script.push(StepperEvent::Commit);
    script.push(StepperEvent::FocusGained);
    script.push(StepperEvent::Backspace);
    script.push(StepperEvent::Commit);
    script.push(StepperEvent::IncrementPressed);
    run("spacing", &mut spacing, script);

    spacing.controller_mut().set_formatter(Rc::new(
        DecimalFormat::new().fraction_digits(2, 2),
    ));
    show("spacing", &spacing);
    log::info!("[spacing] last published value: {:?}", publisher.get());

    Ok(())
}
