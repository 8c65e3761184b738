//! End-to-end tests wiring the registry, proxy, filter, swap control and
//! renderer together the way an application would.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use console_redirect::prelude::*;
use console_redirect::sink::{HOST_TARGET, tracing_console};
use serde_json::{Value, json};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

type Calls = Rc<RefCell<Vec<(OperationName, Vec<Value>)>>>;

fn console_mock() -> (SharedConsole, Calls) {
    let calls: Calls = Rc::default();
    let console = registry()
        .iter()
        .map(|&op| {
            let calls = Rc::clone(&calls);
            (
                op,
                ConsoleFn::from_fn(move |args| calls.borrow_mut().push((op, args.to_vec()))),
            )
        })
        .collect::<Console>();
    (SharedConsole::new(console), calls)
}

#[derive(Clone, Default)]
struct MessageLayer {
    messages: Arc<Mutex<Vec<String>>>,
}

struct MessageVisitor(Option<String>);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S> Layer<S> for MessageLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != HOST_TARGET {
            return;
        }
        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        if let Some(message) = visitor.0 {
            self.messages.lock().unwrap().push(message);
        }
    }
}

fn capture_host_messages<F: FnOnce()>(f: F) -> Vec<String> {
    let layer = MessageLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, f);
    std::mem::take(&mut *layer.messages.lock().unwrap())
}

// ============================================================================
// Ambient Console Tests
// ============================================================================

/// Verifies a scoped rewrite of the ambient console reaches the tracing host.
#[test]
fn scoped_rewrite_of_ambient_console() {
    install_global_console(tracing_console());
    let control = ProxyControl::global();
    control
        .proxy()
        .set_function_handler(
            OperationName::Log,
            Handler::new(|inv| {
                let mut args = vec![json!("[redirected]")];
                args.extend_from_slice(inv.args());
                inv.target_fn().call(&args)
            }),
        )
        .unwrap();

    let messages = capture_host_messages(|| {
        control.exec_template(|| global_console().log(&[json!("hello")]));
        global_console().log(&[json!("plain")]);
    });

    assert_eq!(messages, vec!["[redirected] hello", "plain"]);
}

/// Verifies call sites holding the ambient handle observe the swap.
#[test]
fn existing_handles_see_swapped_bindings() {
    let (mock, calls) = console_mock();
    let previous = install_global_console(mock.snapshot());
    let held = global_console();

    let control = ProxyControl::global();
    control
        .proxy()
        .set_default_handler(DefaultHandler::handler(|_| json!("swallowed")));

    let inside = control.exec_template(|| held.warn(&[json!("w")]));
    let outside = held.warn(&[json!("w")]);

    install_global_console(previous);
    assert_eq!(inside, Some(json!("swallowed")));
    assert_eq!(outside, Some(Value::Null));
    assert_eq!(calls.borrow().len(), 1);
}

// ============================================================================
// Filtering Tests
// ============================================================================

/// Verifies a filter installed as replacement map gates levels while enabled.
#[test]
fn filtered_redirection() {
    let (target, calls) = console_mock();
    let filter = EnablementFilter::new(&target);
    let proxy = ConsoleProxy::new(&target, filter.functions().clone());
    let control = ProxyControl::new(proxy);

    filter.set_level_enabled(LogLevel::Debug, false);
    control.exec_template(|| {
        target.debug(&[json!("hidden")]);
        target.info(&[json!("shown")]);
        target.call(OperationName::Table, &[json!([1])]);
    });
    target.debug(&[json!("direct")]);

    assert_eq!(
        *calls.borrow(),
        vec![
            (OperationName::Info, vec![json!("shown")]),
            (OperationName::Table, vec![json!([1])]),
            (OperationName::Debug, vec![json!("direct")]),
        ]
    );
}

/// Verifies token configuration drives a running filter.
#[test]
fn token_configured_filter() {
    let (target, calls) = console_mock();
    let filter = EnablementFilter::new(&target);
    filter.set_config(LevelEnablement::from_tokens("all0, error").unwrap());

    for level in LogLevel::ALL {
        filter.call(level, &[json!(level.as_str())]);
    }

    assert_eq!(
        *calls.borrow(),
        vec![(OperationName::Error, vec![json!("error")])]
    );
    assert!(!filter.is_level_enabled(LogLevel::Warn));
}

// ============================================================================
// Rendering Tests
// ============================================================================

/// Verifies a bound function renders its severity calls onto a surface.
#[test]
fn bound_function_renders_to_surface() {
    let (target, calls) = console_mock();
    let surface = Rc::new(TextSurface::new().with_element("#console", ""));
    let interceptor = RenderInterceptor::new(&target, surface.clone());
    interceptor.set_config(LogConfig::list());

    let proxy = ConsoleProxy::passthrough(&target);
    proxy.set_default_handler(interceptor.into_handler());
    let control = ProxyControl::new(proxy);

    let console = target.clone();
    let work = control.bind_proxy(move |n: u32| {
        console.info(&[json!("step"), json!(n)]);
        console.call(OperationName::Count, &[json!("steps")]);
        n * 2
    });

    assert_eq!(work(1), 2);
    assert_eq!(work(2), 4);
    assert_eq!(
        surface.text("#console").as_deref(),
        Some("<li>INFO: step 1</li>\n<li>INFO: step 2</li>")
    );
    assert_eq!(
        *calls.borrow(),
        vec![
            (OperationName::Count, vec![json!("steps")]),
            (OperationName::Count, vec![json!("steps")]),
        ]
    );
}

/// Verifies a handler can render some operations and count the rest.
#[test]
fn per_operation_handler_alongside_renderer() {
    let (target, calls) = console_mock();
    let surface = Rc::new(TextSurface::new().with_element("#console", ""));
    let interceptor = RenderInterceptor::new(&target, surface.clone());
    let proxy = ConsoleProxy::new(&target, interceptor.into_handler());

    let counted = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&counted);
    let token = proxy
        .set_function_handler(
            OperationName::Error,
            Handler::new(move |inv| {
                *counter.borrow_mut() += 1;
                inv.proceed()
            }),
        )
        .unwrap();

    let control = ProxyControl::new(proxy);
    control.exec_template(|| {
        target.error(&[json!("boom")]);
        target.log(&[json!("rendered")]);
    });
    token.unregister();
    control.exec_template(|| target.error(&[json!("rendered error")]));

    assert_eq!(*counted.borrow(), 1);
    assert_eq!(
        *calls.borrow(),
        vec![(OperationName::Error, vec![json!("boom")])]
    );
    assert_eq!(
        surface.text("#console").as_deref(),
        Some("LOG: rendered\nERROR: rendered error")
    );
}
