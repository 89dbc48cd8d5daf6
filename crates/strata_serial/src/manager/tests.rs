use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::any::Any;

use strata_reflect::info::Type;
use strata_reflect::registry::TypeRegistry;

use crate::node::{DataNode, MappingNode, NodeRef};
use crate::validation::{NodeLocation, ValidationNode};
use crate::{
    Dependencies, SerialError, SerializationContext, SerializationManager,
    SerializationManagerBuilder, TypeSerializer,
};

// -----------------------------------------------------------------------------
// A composite test plugin

#[derive(Clone, Debug, Default, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

strata_reflect::impl_type_path!((in "strata_serial::tests") Point);

struct Offset(i32);

/// Counts copies made by [`PointSerializer`].
struct Copies(usize);

impl SerializationContext for Copies {}

struct PointSerializer;

impl PointSerializer {
    fn field<'a>(map: &'a MappingNode, name: &str) -> Result<&'a DataNode, SerialError> {
        map.get(name).ok_or_else(|| {
            SerialError::decode(alloc::format!("Missing field '{name}'."), map.clone())
        })
    }
}

impl TypeSerializer<Point> for PointSerializer {
    type Node = MappingNode;

    fn validate<'a>(&self, node: NodeRef<'a, MappingNode>, deps: &Dependencies<'_>) -> ValidationNode<'a> {
        let manager = deps.manager();
        let mut children = Vec::new();
        for name in ["x", "y"] {
            let location = NodeLocation::Key(String::from(name));
            match node.into_node().get(name) {
                Some(field) => children.push((location, manager.validate_nested::<i32>(field))),
                None => children.push((
                    location,
                    ValidationNode::invalid(node.source(), alloc::format!("Missing field '{name}'.")),
                )),
            }
        }
        ValidationNode::composite(node.source(), "Invalid point.", children)
    }

    fn read(
        &self,
        node: &MappingNode,
        deps: &Dependencies<'_>,
        mut ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Point, SerialError> {
        let manager = deps.manager();
        let offset = deps.service::<Offset>().map_or(0, |o| o.0);
        let x: i32 = manager.read(Self::field(node, "x")?, ctx.as_deref_mut())?;
        let y: i32 = manager.read(Self::field(node, "y")?, ctx.as_deref_mut())?;
        Ok(Point {
            x: x + offset,
            y: y + offset,
        })
    }

    fn write(
        &self,
        value: &Point,
        always_write: bool,
        deps: &Dependencies<'_>,
        mut ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<DataNode, SerialError> {
        let manager = deps.manager();
        let mut map = MappingNode::with_capacity(2);
        map.push("x", manager.write(&value.x, always_write, ctx.as_deref_mut())?);
        map.push("y", manager.write(&value.y, always_write, ctx.as_deref_mut())?);
        Ok(map.into())
    }

    fn copy(
        &self,
        source: &Point,
        _target: Point,
        _deps: &Dependencies<'_>,
        ctx: Option<&mut dyn SerializationContext>,
    ) -> Result<Point, SerialError> {
        if let Some(copies) = ctx.and_then(|ctx| ctx.downcast_mut::<Copies>()) {
            copies.0 += 1;
        }
        Ok(source.clone())
    }
}

fn point_manager() -> SerializationManager {
    let mut registry = TypeRegistry::new();
    registry.register::<Point>();

    let mut builder = SerializationManagerBuilder::new();
    builder
        .register::<Point, _>(PointSerializer)
        .register_vec::<Point>()
        .register_option::<Point>()
        .register_btree_map::<String, Point>()
        .with_type_registry(registry);
    builder.build().unwrap()
}

fn point_node(x: &str, y: &str) -> DataNode {
    let mut map = MappingNode::new();
    map.push("x", x);
    map.push("y", y);
    map.into()
}

// -----------------------------------------------------------------------------
// Tests

#[test]
fn unregistered_type_fails_at_use() {
    let manager = SerializationManagerBuilder::empty().build().unwrap();
    let node = DataNode::value("1");
    assert!(!manager.has_serializer::<i32>());
    assert_eq!(
        manager.validate::<i32>(&node).unwrap_err(),
        SerialError::Unregistered { type_name: "i32" }
    );
    assert!(matches!(
        manager.write(&1i32, false, None),
        Err(SerialError::Unregistered { .. })
    ));
}

#[test]
fn nested_unregistered_type_is_invalid() {
    let mut builder = SerializationManagerBuilder::empty();
    builder.register_vec::<u8>();
    let manager = builder.build().unwrap();

    let node: DataNode = serde_json::from_str("[1]").unwrap();
    let result = manager.validate::<Vec<u8>>(&node).unwrap();
    let errors = result.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "[0]");
    assert_eq!(errors[0].message, "No serializer registered for `u8`.");
}

#[test]
fn require_checks_completeness() {
    let mut builder = SerializationManagerBuilder::new();
    builder.require::<i32>().require::<Vec<Point>>();
    assert_eq!(
        builder.build().unwrap_err(),
        SerialError::Unregistered {
            type_name: core::any::type_name::<Vec<Point>>()
        }
    );

    let mut builder = SerializationManagerBuilder::new();
    builder.register_vec::<Point>().require::<Vec<Point>>();
    assert!(builder.build().is_ok());
}

#[test]
fn later_registration_wins() {
    let mut builder = SerializationManagerBuilder::new();
    builder.register::<Point, _>(PointSerializer);
    builder.register::<Point, _>(PointSerializer);
    let manager = builder.build().unwrap();
    assert!(manager.has_serializer::<Point>());
}

#[test]
fn composite_reports_every_nested_failure() {
    let manager = point_manager();
    let mut list = crate::node::SequenceNode::new();
    list.push(point_node("1", "2"));
    list.push(point_node("a", "b"));
    list.push(MappingNode::new());
    let node = DataNode::from(list);

    let result = manager.validate::<Vec<Point>>(&node).unwrap();
    let errors = result.errors();
    let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, ["[1].x", "[1].y", "[2].x", "[2].y"]);
    assert_eq!(errors[0].message, "Failed to parse 'a' as i32.");
    assert_eq!(errors[3].message, "Missing field 'y'.");

    match manager.read_validated::<Vec<Point>>(&node, None) {
        Err(SerialError::Validation(report)) => assert_eq!(report.len(), 4),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn read_write_round_trip_with_service() {
    let manager = point_manager();
    let node = point_node("3", "-4");
    let point = manager.read_validated::<Point>(&node, None).unwrap();
    assert_eq!(point, Point { x: 3, y: -4 });
    assert_eq!(manager.write(&point, false, None).unwrap(), node);

    let mut builder = SerializationManagerBuilder::new();
    builder
        .register::<Point, _>(PointSerializer)
        .with_service(Offset(10));
    let shifted = builder.build().unwrap();
    assert_eq!(
        shifted.read::<Point>(&node, None).unwrap(),
        Point { x: 13, y: 6 }
    );
}

#[test]
fn read_without_validation_reports_decode_error() {
    let manager = point_manager();
    let mut map = MappingNode::new();
    map.push("x", "1");
    let err = manager.read::<Point>(&map.into(), None).unwrap_err();
    assert!(matches!(err, SerialError::Decode(ref e) if e.message == "Missing field 'y'."));
}

#[test]
fn create_copy_starts_from_default() {
    let manager = point_manager();
    let source = vec![Point { x: 1, y: 2 }];
    assert_eq!(manager.create_copy(&source, None).unwrap(), source);
    assert_eq!(
        manager.create_copy(&String::from("s"), None).unwrap(),
        "s"
    );
}

#[test]
fn dynamic_operations() {
    let manager = point_manager();
    let ty = Type::of::<Point>();
    let node = point_node("5", "6");

    assert!(manager.has_serializer_dyn(ty));
    assert!(manager.validate_dyn(ty, &node).unwrap().is_valid());

    let value = manager.read_dyn(ty, &node, None).unwrap();
    assert_eq!(value.downcast_ref::<Point>(), Some(&Point { x: 5, y: 6 }));

    assert_eq!(manager.write_dyn(&*value, false, None).unwrap(), node);

    let copied = manager
        .copy_dyn(&*value, Box::new(Point::default()), None)
        .unwrap();
    assert_eq!(copied.downcast_ref::<Point>(), Some(&Point { x: 5, y: 6 }));

    let wrong = manager.copy_dyn(&*value, Box::new(1u8), None);
    assert!(matches!(
        wrong,
        Err(SerialError::MismatchedType { found: "u8", .. })
    ));

    struct Unknown;
    let unknown: &dyn Any = &Unknown;
    assert!(matches!(
        manager.write_dyn(unknown, false, None),
        Err(SerialError::Unregistered { .. })
    ));
}

#[test]
fn tagged_nodes() {
    let manager = point_manager();

    let node = manager.write_tagged(&Point { x: 1, y: 1 }, false, None).unwrap();
    assert_eq!(node.tag(), Some("!type:strata_serial::tests::Point"));
    assert!(manager.validate_tagged(&node).unwrap().is_valid());
    let value = manager.read_tagged(&node, None).unwrap();
    assert_eq!(value.downcast_ref::<Point>(), Some(&Point { x: 1, y: 1 }));

    let short = DataNode::value("2.5").with_tag("!type:double");
    let value = manager.read_tagged(&short, None).unwrap();
    assert_eq!(value.downcast_ref::<f64>(), Some(&2.5));

    for tag in ["!type:Missing", "!int"] {
        let node = DataNode::value("1").with_tag(tag);
        assert_eq!(
            manager.read_tagged(&node, None).unwrap_err(),
            SerialError::UnknownTag {
                tag: String::from(tag)
            }
        );
    }
    assert!(matches!(
        manager.read_tagged(&DataNode::value("1"), None),
        Err(SerialError::UnknownTag { .. })
    ));
}

#[test]
fn manager_is_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SerializationManager>();

    let manager = Arc::new(point_manager());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let manager = Arc::clone(&manager);
            std::thread::spawn(move || {
                let node = point_node(&alloc::format!("{i}"), "0");
                manager.read_validated::<Point>(&node, None).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap().x, i as i32);
    }
}

#[test]
fn auto_register_is_repeatable() {
    let mut builder = SerializationManagerBuilder::empty();
    let first = builder.auto_register();
    let second = builder.auto_register();
    assert_eq!(first, second);
    if !cfg!(feature = "auto_register") {
        assert!(!first);
    }
}

#[test]
fn container_copies_go_through_item_serializer() {
    let manager = point_manager();
    let point = |x| Point { x, y: -x };

    let mut copies = Copies(0);
    let source = vec![point(1), point(2), point(3)];
    let copied = manager.copy(&source, vec![point(9)], Some(&mut copies)).unwrap();
    assert_eq!(copied, source);
    assert_eq!(copies.0, 3);

    let mut copies = Copies(0);
    let source = BTreeMap::from([(String::from("a"), point(1)), (String::from("b"), point(2))]);
    let copied = manager.copy(&source, BTreeMap::new(), Some(&mut copies)).unwrap();
    assert_eq!(copied, source);
    assert_eq!(copies.0, 2);

    let mut copies = Copies(0);
    let copied = manager.copy(&Some(point(4)), None, Some(&mut copies)).unwrap();
    assert_eq!(copied, Some(point(4)));
    assert_eq!(copies.0, 1);
}
