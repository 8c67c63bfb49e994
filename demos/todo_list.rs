//! Todo list demo: a repeat region driven by a mutable list.
//!
//! Shows the incremental update path: the list is edited in place and each
//! snapshot is pushed through an array subject, so untouched items keep
//! their rendered instances.
//!
//! Run with: `cargo run --example todo_list`

use std::cell::RefCell;
use std::rc::Rc;

use viewflow::{ArrayStream, ComponentFactory, Context, MemoryHost, NodeDescriptor, Renderer, Tag, Value};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let host = Rc::new(RefCell::new(MemoryHost::new()));
    let root = host.borrow_mut().create_root();

    // <div>
    //   <div repeat="todos">
    //     <span bind="nextKey"/>
    //     <span bind="nextVal"/>
    //   </div>
    // </div>
    let descriptor = NodeDescriptor::new(Tag::Block).with_child(
        NodeDescriptor::new(Tag::Block)
            .with_repeat("todos")
            .with_child(NodeDescriptor::new(Tag::Inline).with_bind("nextKey"))
            .with_child(NodeDescriptor::new(Tag::Inline).with_bind("nextVal")),
    );

    let (publisher, todos) = ArrayStream::<Value>::subject();
    let context = Context::from_bindings([("todos", todos)]);
    let component = ComponentFactory::from_node(descriptor, context);

    let handle = Renderer::new(host.clone(), root)
        .render(&component)
        .unwrap_or_else(|error| panic!("render failed: {error}"));

    let mut list: Vec<Value> = vec![
        Value::from("buy milk"),
        Value::from("write docs"),
        Value::from("ship release"),
    ];
    publisher.next(list.clone());
    println!("initial:   {}", host.borrow().text_content(root));

    // Complete the first todo.
    list.remove(0);
    publisher.next(list.clone());
    println!("completed: {}", host.borrow().text_content(root));

    // Ship first.
    let shipped = list.remove(1);
    list.insert(0, shipped);
    publisher.next(list.clone());
    println!("reordered: {}", host.borrow().text_content(root));

    // New todo at the end.
    list.push(Value::from("plan next sprint"));
    publisher.next(list.clone());
    println!("added:     {}", host.borrow().text_content(root));

    handle.dispose();
    println!("disposed, container empty: {}", host.borrow().children(root).is_empty());
}
