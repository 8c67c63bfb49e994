//! Counter demo: a button whose clicks drive a bound counter.
//!
//! Run with: `cargo run --example counter`

use std::cell::RefCell;
use std::rc::Rc;

use viewflow::{
    ComponentFactory, Context, ContextEntry, EventSink, MemoryHost, NodeDescriptor, Renderer,
    StreamObserver, Tag, Value, subject,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let host = Rc::new(RefCell::new(MemoryHost::new()));
    let root = host.borrow_mut().create_root();

    // <div>
    //   <span bind="count"/>
    //   <button click="increment">#text "+1"</button>
    // </div>
    let descriptor = NodeDescriptor::new(Tag::Block)
        .with_child(NodeDescriptor::new(Tag::Inline).with_bind("count"))
        .with_child(
            NodeDescriptor::new(Tag::Action)
                .with_click("increment")
                .with_child(NodeDescriptor::text("+1")),
        );

    let (count_publisher, count_stream) = subject::<Value>();
    let (increment_sink, increments) = EventSink::channel();

    let context = Context::from_bindings([
        ("count", ContextEntry::from(count_stream)),
        ("increment", ContextEntry::from(increment_sink)),
    ]);
    let component = ComponentFactory::from_node(descriptor, context);

    let handle = Renderer::new(host.clone(), root)
        .render(&component)
        .unwrap_or_else(|error| panic!("render failed: {error}"));

    // Application state: clicks feed back into the count stream.
    let count = Rc::new(RefCell::new(0i64));
    let count_clone = count.clone();
    let publisher = count_publisher.clone();
    let _sub = increments.subscribe(StreamObserver::on_next(move |_| {
        let mut count = count_clone.borrow_mut();
        *count += 1;
        publisher.next(Value::from(*count));
    }));

    count_publisher.next(Value::from(0i64));
    println!("initial: {:?}", host.borrow().text_content(root));

    // Simulate three user activations of the button.
    let button = host.borrow().children(root)[1];
    for _ in 0..3 {
        MemoryHost::dispatch(&host, button);
        println!("clicked: {:?}", host.borrow().text_content(root));
    }

    handle.dispose();
    println!("disposed, container empty: {}", host.borrow().children(root).is_empty());
}
