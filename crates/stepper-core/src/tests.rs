#[cfg(test)]
mod tests {
    use crate::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<Option<f64>>>>;

    fn recorder() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn stepper(cfg: StepperConfig) -> StepperController {
        StepperController::new(cfg).expect("valid config")
    }

    /// Hooks a delegate and a publisher subscriber into their own logs.
    fn observe(s: &mut StepperController) -> (Log, Log, Subscription<Option<f64>>) {
        let delegate_log = recorder();
        let publisher_log = recorder();
        s.set_delegate({
            let log = delegate_log.clone();
            move |v: Option<f64>| log.borrow_mut().push(v)
        });
        let sub = s.subscribe({
            let log = publisher_log.clone();
            move |v: &Option<f64>| log.borrow_mut().push(*v)
        });
        (delegate_log, publisher_log, sub)
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let called = Rc::new(RefCell::new(false));

        let called_clone = called.clone();
        let _sub = sig.subscribe(move |_| {
            *called_clone.borrow_mut() = true;
        });

        sig.set(42);
        assert!(*called.borrow());
    }

    #[test]
    fn test_signal_delivers_in_subscription_order() {
        let sig = signal(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut subs = Vec::new();
        for name in ["a", "b", "c"] {
            let order = order.clone();
            subs.push(sig.subscribe(move |_| order.borrow_mut().push(name)));
        }
        // free a slot, then subscribe again: the newcomer still goes last
        subs.remove(0).unsubscribe();
        let order_d = order.clone();
        let _d = sig.subscribe(move |_| order_d.borrow_mut().push("d"));

        sig.set(1);
        assert_eq!(*order.borrow(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_signal_subscriber_can_read_during_delivery() {
        let sig = signal(1);
        let seen = Rc::new(RefCell::new(None));
        let _sub = sig.subscribe({
            let sig = sig.clone();
            let seen = seen.clone();
            move |_| *seen.borrow_mut() = Some(sig.get())
        });
        sig.set(7);
        assert_eq!(*seen.borrow(), Some(7));
    }

    #[test]
    fn test_subscription_drop_and_detach() {
        let sig = signal(0);
        {
            let _sub = sig.subscribe(|_| {});
            assert_eq!(sig.subscriber_count(), 1);
        }
        assert_eq!(sig.subscriber_count(), 0);

        sig.subscribe(|_| {}).detach();
        assert_eq!(sig.subscriber_count(), 1);

        let sub = sig.subscribe(|_| {});
        assert!(sub.is_active());
        let dispose = sub.into_dispose();
        assert_eq!(sig.subscriber_count(), 2);
        dispose.run();
        dispose.run();
        assert!(dispose.is_spent());
        assert_eq!(sig.subscriber_count(), 1);
    }

    #[test]
    fn test_clamping_for_all_values() {
        let mut s = stepper(StepperConfig::new().range(-5.0, 5.0));
        for v in [-1e9, -5.5, -5.0, -0.25, 0.0, 3.0, 5.0, 5.01, 1e9, f64::INFINITY] {
            s.set_value(Some(v));
            assert_eq!(s.value(), Some(v.clamp(-5.0, 5.0)));
        }
    }

    #[test]
    fn test_nan_is_ignored() {
        let mut s = stepper(StepperConfig::new().initial_value(Some(3.0)));
        assert!(!s.set_value(Some(f64::NAN)));
        assert_eq!(s.value(), Some(3.0));
    }

    #[test]
    fn test_initial_value_is_clamped() {
        let s = stepper(StepperConfig::new().range(0.0, 10.0).initial_value(Some(23.0)));
        assert_eq!(s.value(), Some(10.0));
        assert_eq!(s.text(), "10");
    }

    #[test]
    fn test_construction_rejects_bad_config() {
        assert!(matches!(
            StepperController::new(StepperConfig::new().range(1.0, 0.0)),
            Err(ConfigError::InvalidRange { .. })
        ));
        assert!(matches!(
            StepperController::new(StepperConfig::new().increment(0.0)),
            Err(ConfigError::InvalidIncrement(_))
        ));
        assert!(matches!(
            StepperController::new(StepperConfig::new().allows_empty(false)),
            Err(ConfigError::EmptyNotAllowed)
        ));
    }

    #[test]
    fn test_empty_refused_without_allows_empty() {
        let mut s = stepper(
            StepperConfig::new()
                .initial_value(Some(4.0))
                .allows_empty(false),
        );
        let (delegate, publisher, _sub) = observe(&mut s);
        assert!(!s.set_value(None));
        assert_eq!(s.value(), Some(4.0));
        assert!(delegate.borrow().is_empty());
        assert!(publisher.borrow().is_empty());
    }

    #[test]
    fn test_increment_to_max_then_stops_notifying() {
        let mut s = stepper(
            StepperConfig::new()
                .range(0.0, 10.0)
                .increment(1.0)
                .initial_value(Some(5.0)),
        );
        let (delegate, publisher, _sub) = observe(&mut s);

        for _ in 0..5 {
            assert!(s.increment());
        }
        assert!(!s.increment());

        let expected = vec![Some(6.0), Some(7.0), Some(8.0), Some(9.0), Some(10.0)];
        assert_eq!(*delegate.borrow(), expected);
        assert_eq!(*publisher.borrow(), expected);
        assert_eq!(s.value(), Some(10.0));
        assert!(!s.can_increment());
        assert!(s.can_decrement());
    }

    #[test]
    fn test_decrement_stops_at_min() {
        let mut s = stepper(
            StepperConfig::new()
                .range(0.0, 1.0)
                .increment(0.75)
                .initial_value(Some(1.0)),
        );
        assert!(s.decrement());
        assert_eq!(s.value(), Some(0.25));
        assert!(s.decrement());
        assert_eq!(s.value(), Some(0.0));
        assert!(!s.can_decrement());
        assert!(!s.decrement());
    }

    #[test]
    fn test_notification_consistency() {
        let mut s = stepper(StepperConfig::new().range(0.0, 100.0).initial_value(Some(1.0)));
        let publisher = s.publisher();
        let seen_by_delegate = Rc::new(RefCell::new(Vec::new()));
        let seen_by_subscriber = Rc::new(RefCell::new(Vec::new()));

        s.set_delegate({
            let publisher = publisher.clone();
            let seen = seen_by_delegate.clone();
            move |v: Option<f64>| seen.borrow_mut().push((v, publisher.get()))
        });
        let _sub = s.subscribe({
            let publisher = publisher.clone();
            let seen = seen_by_subscriber.clone();
            move |v: &Option<f64>| seen.borrow_mut().push((*v, publisher.get()))
        });

        s.set_value(Some(42.0));

        assert_eq!(*seen_by_delegate.borrow(), vec![(Some(42.0), Some(42.0))]);
        assert_eq!(*seen_by_subscriber.borrow(), vec![(Some(42.0), Some(42.0))]);
        assert_eq!(s.value(), Some(42.0));
        assert_eq!(publisher.get(), Some(42.0));
    }

    #[test]
    fn test_delegate_runs_before_subscribers() {
        let mut s = stepper(StepperConfig::new().initial_value(Some(0.0)));
        let order = Rc::new(RefCell::new(Vec::new()));
        let _sub = s.subscribe({
            let order = order.clone();
            move |_: &Option<f64>| order.borrow_mut().push("publisher")
        });
        s.set_delegate({
            let order = order.clone();
            move |_: Option<f64>| order.borrow_mut().push("delegate")
        });
        s.increment();
        assert_eq!(*order.borrow(), vec!["delegate", "publisher"]);
    }

    #[test]
    fn test_set_range_reclamps_with_one_notification() {
        let mut s = stepper(StepperConfig::new().range(0.0, 100.0).initial_value(Some(50.0)));
        let (delegate, publisher, _sub) = observe(&mut s);

        s.set_range(0.0, 30.0).unwrap();

        assert_eq!(s.value(), Some(30.0));
        assert_eq!(*delegate.borrow(), vec![Some(30.0)]);
        assert_eq!(*publisher.borrow(), vec![Some(30.0)]);
    }

    #[test]
    fn test_set_range_inside_is_silent() {
        let mut s = stepper(StepperConfig::new().range(0.0, 100.0).initial_value(Some(50.0)));
        let (delegate, _publisher, _sub) = observe(&mut s);
        s.set_range(10.0, 60.0).unwrap();
        s.set_minimum(-10.0).unwrap();
        assert_eq!(s.value(), Some(50.0));
        assert!(delegate.borrow().is_empty());
        assert_eq!(s.range(), (-10.0, 60.0));
    }

    #[test]
    fn test_set_range_rejects_inverted_bounds() {
        let mut s = stepper(StepperConfig::new().range(0.0, 10.0).initial_value(Some(5.0)));
        assert!(s.set_range(5.0, 1.0).is_err());
        assert!(s.set_maximum(-1.0).is_err());
        assert_eq!(s.range(), (0.0, 10.0));
        assert!(s.set_increment(-2.0).is_err());
        assert_eq!(s.increment_step(), 1.0);
    }

    #[test]
    fn test_empty_text_with_allows_empty() {
        let mut s = stepper(StepperConfig::new().range(-10.0, 10.0).initial_value(Some(2.0)));
        let (delegate, _publisher, _sub) = observe(&mut s);

        s.set_text("").unwrap();

        assert_eq!(s.value(), None);
        assert_eq!(s.text(), "");
        assert!(s.can_increment());
        assert!(s.can_decrement());
        assert_eq!(*delegate.borrow(), vec![None]);
    }

    #[test]
    fn test_increment_from_empty_without_history() {
        let mut s = stepper(StepperConfig::new().increment(2.5));
        assert_eq!(s.value(), None);
        s.increment();
        assert_eq!(s.value(), Some(2.5));

        // zero outside the range: the step lands on the nearest bound
        let mut s = stepper(StepperConfig::new().range(10.0, 20.0));
        s.increment();
        assert_eq!(s.value(), Some(10.0));
    }

    #[test]
    fn test_increment_from_empty_resumes_last_value() {
        let mut s = stepper(StepperConfig::new().range(0.0, 100.0).initial_value(Some(40.0)));
        s.set_value(None);
        s.increment();
        assert_eq!(s.value(), Some(41.0));

        s.set_value(None);
        s.decrement();
        assert_eq!(s.value(), Some(40.0));
    }

    #[test]
    fn test_empty_text_without_allows_empty() {
        let mut s = stepper(
            StepperConfig::new()
                .initial_value(Some(8.0))
                .allows_empty(false),
        );
        let (delegate, _publisher, _sub) = observe(&mut s);

        assert_eq!(s.set_text(""), Err(ParseError::EmptyNotAllowed));
        assert_eq!(s.set_text("   "), Err(ParseError::EmptyNotAllowed));
        assert_eq!(s.value(), Some(8.0));
        assert_eq!(s.text(), "8");
        assert!(delegate.borrow().is_empty());
    }

    #[test]
    fn test_invalid_text_keeps_value() {
        let mut s = stepper(StepperConfig::new().initial_value(Some(3.0)));
        assert_eq!(
            s.commit_text("three"),
            Err(ParseError::InvalidFormat("three".into()))
        );
        assert_eq!(s.value(), Some(3.0));
        assert_eq!(s.text(), "3");
    }

    #[test]
    fn test_live_gating_rejects_but_commit_clamps() {
        let mut s = stepper(StepperConfig::new().range(0.0, 50.0).initial_value(Some(1.0)));

        assert_eq!(s.validate_candidate_text("12"), Ok(Some(12.0)));
        assert_eq!(
            s.validate_candidate_text("51"),
            Err(ParseError::OutOfRange {
                value: 51.0,
                min: 0.0,
                max: 50.0
            })
        );
        assert_eq!(s.validate_candidate_text(""), Ok(None));
        assert!(matches!(
            s.validate_candidate_text("1x"),
            Err(ParseError::InvalidFormat(_))
        ));
        // gating never mutates
        assert_eq!(s.value(), Some(1.0));

        s.commit_text("51").unwrap();
        assert_eq!(s.value(), Some(50.0));
        s.commit_text("-7").unwrap();
        assert_eq!(s.value(), Some(0.0));
    }

    #[test]
    fn test_keyboard_input_disabled() {
        let mut s = stepper(
            StepperConfig::new()
                .initial_value(Some(1.0))
                .allows_keyboard_input(false),
        );
        assert_eq!(s.validate_candidate_text("2"), Err(ParseError::NotEditable));
        assert_eq!(s.commit_text("2"), Err(ParseError::NotEditable));
        assert_eq!(s.value(), Some(1.0));
        // the buttons still work
        assert!(s.increment());

        s.set_allows_keyboard_input(true);
        s.commit_text("9").unwrap();
        assert_eq!(s.value(), Some(9.0));
    }

    #[test]
    fn test_disabled_blocks_stepping_only() {
        let mut s = stepper(StepperConfig::new().initial_value(Some(1.0)).enabled(false));
        assert!(!s.can_increment());
        assert!(!s.can_decrement());
        assert!(!s.increment());
        assert_eq!(s.value(), Some(1.0));

        assert!(s.set_value(Some(5.0)));
        s.set_enabled(true);
        assert!(s.increment());
        assert_eq!(s.value(), Some(6.0));
    }

    #[test]
    fn test_formatter_swap_rerenders_without_notifying() {
        let mut s = stepper(StepperConfig::new().initial_value(Some(1234.5)));
        let (delegate, _publisher, _sub) = observe(&mut s);
        assert_eq!(s.text(), "1,234");

        s.set_formatter(Rc::new(DecimalFormat::new().fraction_digits(2, 2)));

        assert_eq!(s.text(), "1,234.50");
        assert_eq!(s.value(), Some(1234.5));
        assert!(delegate.borrow().is_empty());
    }

    #[test]
    fn test_format_parse_round_trip_matches_direct_set() {
        let fmt = Rc::new(DecimalFormat::new().fraction_digits(1, 1));
        let cfg = StepperConfig::new().range(-10.0, 10.0).formatter(fmt.clone());
        for v in [-10.0, -9.95, -0.5, 0.0, 0.04, 3.3, 9.96, 10.0] {
            let mut direct = stepper(cfg.clone());
            direct.set_value(Some(v));

            let mut typed = stepper(cfg.clone());
            typed.commit_text(&fmt.format(v)).unwrap();

            let (a, b) = (direct.value().unwrap(), typed.value().unwrap());
            assert!((a - b).abs() <= 0.05 + 1e-9, "{v}: {a} vs {b}");
            assert!((-10.0..=10.0).contains(&b));
        }
    }

    #[test]
    fn test_fractional_position() {
        let mut s = stepper(StepperConfig::new().range(0.0, 200.0).initial_value(Some(50.0)));
        assert_eq!(s.fractional_position(), Some(0.25));
        s.set_value(None);
        assert_eq!(s.fractional_position(), None);

        let unbounded = stepper(StepperConfig::new().initial_value(Some(5.0)));
        assert_eq!(unbounded.fractional_position(), None);

        let half_open = stepper(StepperConfig::new().range(0.0, f64::MAX).initial_value(Some(5.0)));
        assert_eq!(half_open.fractional_position(), None);

        let point = stepper(StepperConfig::new().range(3.0, 3.0).initial_value(Some(3.0)));
        assert_eq!(point.fractional_position(), None);
    }

    #[test]
    fn test_placeholder_shown_only_when_empty() {
        let mut s = stepper(
            StepperConfig::new()
                .placeholder("inherited")
                .initial_value(Some(2.0)),
        );
        assert_eq!(s.display_text(), "2");
        s.set_value(None);
        assert_eq!(s.display_text(), "inherited");
        assert_eq!(s.text(), "");
    }

    #[test]
    fn test_disallowing_empty_restores_last_value() {
        let mut s = stepper(StepperConfig::new().range(0.0, 10.0).initial_value(Some(7.0)));
        s.set_value(None);
        let (delegate, _publisher, _sub) = observe(&mut s);

        s.set_allows_empty(false);

        assert_eq!(s.value(), Some(7.0));
        assert_eq!(*delegate.borrow(), vec![Some(7.0)]);
        assert!(!s.set_value(None));
    }

    #[test]
    fn test_edit_session_cancel_and_end() {
        let mut s = stepper(StepperConfig::new().range(0.0, 10.0).initial_value(Some(4.0)));
        s.begin_edit();
        assert!(s.is_editing());
        // a button press in the middle of an edit
        s.increment();
        assert!(s.cancel_edit());
        assert_eq!(s.value(), Some(4.0));
        assert!(!s.is_editing());
        assert!(!s.cancel_edit());

        s.begin_edit();
        assert!(s.end_edit("nope").is_err());
        assert!(!s.is_editing());
        assert_eq!(s.text(), "4");

        s.begin_edit();
        s.end_edit("6").unwrap();
        assert_eq!(s.value(), Some(6.0));
    }

    #[test]
    fn test_clear_delegate_keeps_publisher() {
        let mut s = stepper(StepperConfig::new().initial_value(Some(0.0)));
        let (delegate, publisher, _sub) = observe(&mut s);
        s.clear_delegate();
        assert!(!s.has_delegate());
        s.increment();
        assert!(delegate.borrow().is_empty());
        assert_eq!(*publisher.borrow(), vec![Some(1.0)]);
    }

    #[test]
    fn test_many_subscribers_and_teardown() {
        let s = &mut stepper(StepperConfig::new().initial_value(Some(0.0)));
        let logs: Vec<Log> = (0..3).map(|_| recorder()).collect();
        let mut subs: Vec<_> = logs
            .iter()
            .map(|log| {
                let log = log.clone();
                s.subscribe(move |v: &Option<f64>| log.borrow_mut().push(*v))
            })
            .collect();
        assert_eq!(s.publisher().subscriber_count(), 3);

        s.increment();
        if let Some(last) = subs.pop() {
            last.unsubscribe();
        }
        s.increment();

        assert_eq!(*logs[0].borrow(), vec![Some(1.0), Some(2.0)]);
        assert_eq!(*logs[1].borrow(), vec![Some(1.0), Some(2.0)]);
        assert_eq!(*logs[2].borrow(), vec![Some(1.0)]);
    }
}
