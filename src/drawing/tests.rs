use std::collections::BTreeMap;

use bevy::math::Vec2;

use super::*;
use crate::config::{ControlSetting, CustomControl, MapOptions, ToolConfig};
use crate::error::GeodrawerError;
use crate::geo::{self, LatLng};
use crate::map::{MapSurface, Shape, ShapeId};

fn options_with(tools: &[(ToolName, u32)]) -> MapOptions {
    MapOptions {
        tools: tools
            .iter()
            .map(|(name, max)| {
                (
                    name.to_string(),
                    ToolConfig {
                        ctrl: None,
                        options: ToolOptions {
                            max_items_allowed: *max,
                        },
                    },
                )
            })
            .collect(),
        ..Default::default()
    }
}

fn controller_with(tools: &[(ToolName, u32)]) -> MapController {
    MapController::from_options(&options_with(tools)).unwrap()
}

fn click(controller: &mut MapController, surface: &mut MapSurface, lat: f64, lng: f64) -> ClickOutcome {
    controller
        .click(surface, LatLng::new(lat, lng))
        .expect("a drawing tool is selected")
}

fn item_count(controller: &MapController, tool: ToolName) -> usize {
    controller.tool(tool).unwrap().state().items().len()
}

// ============================================================================
// Tool names and options
// ============================================================================

#[test]
fn test_tool_name_round_trip() {
    for name in ToolName::ALL {
        assert_eq!(name.to_string().parse::<ToolName>().unwrap(), name);
    }
    assert!(matches!(
        "rectangle".parse::<ToolName>(),
        Err(GeodrawerError::UnsupportedTool(_))
    ));
}

#[test]
fn test_set_max_items_allowed_keeps_leading_integer() {
    let mut state = ToolState::new(ToolName::Point, None, ToolOptions::default());
    assert!(state.set_max_items_allowed("3"));
    assert_eq!(state.options().max_items_allowed, 3);
    assert!(state.set_max_items_allowed(" 12 items"));
    assert_eq!(state.options().max_items_allowed, 12);
    assert!(state.set_max_items_allowed("7.9"));
    assert_eq!(state.options().max_items_allowed, 7);
}

#[test]
fn test_set_max_items_allowed_rejects_garbage() {
    let mut state = ToolState::new(ToolName::Point, None, ToolOptions::default());
    assert!(!state.set_max_items_allowed("many"));
    assert!(!state.set_max_items_allowed(""));
    assert!(!state.set_max_items_allowed("-2"));
    assert_eq!(state.options().max_items_allowed, 1);
}

#[test]
fn test_set_max_items_allowed_rejects_zero() {
    let mut state = ToolState::new(ToolName::Point, None, ToolOptions::default());
    assert!(state.set_max_items_allowed("4"));
    assert!(!state.set_max_items_allowed("0"));
    assert!(!state.set_max_items_allowed("00 shapes"));
    assert_eq!(state.options().max_items_allowed, 4);
}

// ============================================================================
// Item caps
// ============================================================================

#[test]
fn test_item_cap_holds_for_every_tool() {
    for tool in ToolName::ALL {
        let mut surface = MapSurface::default();
        let mut controller = controller_with(&[(tool, 2)]);

        for i in 0..10 {
            // Reselect so path tools start a new shape on each click
            controller.set_drawing(tool);
            click(&mut controller, &mut surface, i as f64, i as f64);
            // Close any circle being sized
            click(&mut controller, &mut surface, i as f64, i as f64 + 0.5);
            assert!(item_count(&controller, tool) <= 2, "{} exceeded its cap", tool);
        }
        assert_eq!(item_count(&controller, tool), 2);
    }
}

#[test]
fn test_point_cap_one() {
    let mut surface = MapSurface::default();
    let mut controller = controller_with(&[(ToolName::Point, 1)]);
    controller.set_drawing(ToolName::Point);

    let first = click(&mut controller, &mut surface, 45.0, 7.0);
    let ClickOutcome::Created(marker) = first else {
        panic!("expected a marker, got {:?}", first);
    };
    assert_eq!(
        surface.get(marker),
        Some(&Shape::Marker {
            position: LatLng::new(45.0, 7.0),
            draggable: true
        })
    );

    assert_eq!(
        click(&mut controller, &mut surface, 46.0, 8.0),
        ClickOutcome::Rejected
    );
    assert_eq!(item_count(&controller, ToolName::Point), 1);
    assert_eq!(
        controller.take_notices(),
        vec![Notice {
            message: "Maximum number of insertable points reached".to_string()
        }]
    );
    assert!(controller.notices().is_empty());
}

// ============================================================================
// Path tools
// ============================================================================

#[test]
fn test_polyline_two_shapes_export() {
    let mut surface = MapSurface::default();
    let mut controller = controller_with(&[(ToolName::Polyline, 2)]);

    controller.set_drawing(ToolName::Polyline);
    click(&mut controller, &mut surface, 45.0, 7.0);
    click(&mut controller, &mut surface, 46.0, 7.0);

    controller.set_drawing(ToolName::Polyline);
    click(&mut controller, &mut surface, 42.0, 11.0);
    click(&mut controller, &mut surface, 41.0, 10.8);
    click(&mut controller, &mut surface, 44.0, 8.0);

    let snapshot = controller.export_map(&surface);
    assert_eq!(
        serde_json::to_value(&snapshot.polyline).unwrap(),
        serde_json::json!([
            [{"lat": 45.0, "lng": 7.0}, {"lat": 46.0, "lng": 7.0}],
            [{"lat": 42.0, "lng": 11.0}, {"lat": 41.0, "lng": 10.8}, {"lat": 44.0, "lng": 8.0}]
        ])
    );
}

#[test]
fn test_path_tool_extends_until_reselected() {
    let mut surface = MapSurface::default();
    let mut tool = PolygonTool::new(None, ToolOptions { max_items_allowed: 3 });
    tool.prepare_tool();

    let ClickOutcome::Created(shape) = tool.click_handler(&mut surface, LatLng::new(0.0, 0.0))
    else {
        panic!("first click should start a polygon");
    };
    assert_eq!(
        tool.click_handler(&mut surface, LatLng::new(0.0, 1.0)),
        ClickOutcome::Extended(shape)
    );

    tool.prepare_tool();
    let ClickOutcome::Created(second) = tool.click_handler(&mut surface, LatLng::new(2.0, 2.0))
    else {
        panic!("reselecting should start a new polygon");
    };
    assert_ne!(second, shape);
    assert_eq!(
        tool.click_handler(&mut surface, LatLng::new(2.0, 3.0)),
        ClickOutcome::Extended(second)
    );
    assert_eq!(surface.path(shape).map(|path| path.len()), Some(2));
}

#[test]
fn test_deleting_active_polygon_starts_new_shape() {
    let mut surface = MapSurface::default();
    let mut tool = PolygonTool::new(None, ToolOptions::default());
    tool.prepare_tool();

    let ClickOutcome::Created(shape) = tool.click_handler(&mut surface, LatLng::new(0.0, 0.0))
    else {
        panic!("first click should start a polygon");
    };
    tool.click_handler(&mut surface, LatLng::new(0.0, 1.0));

    assert!(tool.delete_item(&mut surface, shape));
    assert!(surface.is_empty());

    let next = tool.click_handler(&mut surface, LatLng::new(5.0, 5.0));
    let ClickOutcome::Created(new_shape) = next else {
        panic!("expected a new polygon, got {:?}", next);
    };
    assert_ne!(new_shape, shape);
    assert_eq!(surface.path(new_shape), Some(&[LatLng::new(5.0, 5.0)][..]));
}

#[test]
fn test_out_of_order_deletion_keeps_remaining_shapes() {
    let mut surface = MapSurface::default();
    let mut tool = PolylineTool::new(None, ToolOptions { max_items_allowed: 3 });

    let mut shapes = Vec::new();
    for i in 0..3 {
        tool.prepare_tool();
        if let ClickOutcome::Created(id) =
            tool.click_handler(&mut surface, LatLng::new(i as f64, 0.0))
        {
            shapes.push(id);
        }
    }

    tool.delete_item(&mut surface, shapes[0]);
    assert_eq!(tool.state().items(), &shapes[1..]);
    assert!(surface.contains(shapes[2]));

    // Deletion forces a fresh shape on the next click, which fits under the cap again
    assert!(tool.state().next_shape());
    let ClickOutcome::Created(fresh) = tool.click_handler(&mut surface, LatLng::new(9.0, 9.0))
    else {
        panic!("expected a new polyline after deletion");
    };
    assert_eq!(tool.state().items(), &[shapes[1], shapes[2], fresh]);
    assert_eq!(surface.path(shapes[2]).map(|path| path.len()), Some(1));
}

#[test]
fn test_delete_unknown_shape_is_ignored() {
    let mut surface = MapSurface::default();
    let foreign = surface.add_marker(LatLng::new(1.0, 1.0));
    let mut tool = PolylineTool::new(None, ToolOptions::default());
    assert!(!tool.delete_item(&mut surface, foreign));
    assert!(surface.contains(foreign));
}

// ============================================================================
// Circle tool
// ============================================================================

#[test]
fn test_circle_sizing_follows_pointer() {
    let mut surface = MapSurface::default();
    let mut tool = CircleTool::new(None, ToolOptions::default());
    let anchor = LatLng::new(0.0, 0.0);

    let ClickOutcome::Created(circle) = tool.click_handler(&mut surface, anchor) else {
        panic!("expected a circle");
    };
    assert_eq!(
        surface.get(circle),
        Some(&Shape::Circle {
            center: anchor,
            radius: 1.0
        })
    );

    let pointer = LatLng::new(0.0, 1.0);
    assert!(tool.pointer_moved(&mut surface, pointer));
    let Some(Shape::Circle { radius, .. }) = surface.get(circle) else {
        panic!("circle missing");
    };
    assert!((radius - geo::distance(anchor, pointer)).abs() < 1e-9);
    assert!((radius - 111_195.0).abs() < 1.0);

    assert_eq!(
        tool.click_handler(&mut surface, pointer),
        ClickOutcome::Finalized(circle)
    );
    assert!(!tool.pointer_moved(&mut surface, LatLng::new(3.0, 3.0)));
}

#[test]
fn test_circle_at_cap_rejects() {
    let mut surface = MapSurface::default();
    let mut tool = CircleTool::new(None, ToolOptions::default());
    tool.click_handler(&mut surface, LatLng::new(0.0, 0.0));
    tool.click_handler(&mut surface, LatLng::new(0.0, 0.1));
    assert_eq!(
        tool.click_handler(&mut surface, LatLng::new(5.0, 5.0)),
        ClickOutcome::Rejected
    );
    assert_eq!(tool.state().items().len(), 1);
}

#[test]
fn test_deleting_sizing_circle_stops_sizing() {
    let mut surface = MapSurface::default();
    let mut tool = CircleTool::new(None, ToolOptions::default());
    let ClickOutcome::Created(circle) = tool.click_handler(&mut surface, LatLng::new(0.0, 0.0))
    else {
        panic!("expected a circle");
    };
    assert!(tool.delete_item(&mut surface, circle));
    assert!(!tool.pointer_moved(&mut surface, LatLng::new(2.0, 2.0)));
    assert!(matches!(
        tool.click_handler(&mut surface, LatLng::new(1.0, 1.0)),
        ClickOutcome::Created(_)
    ));
}

// ============================================================================
// Export / import
// ============================================================================

#[test]
fn test_export_clear_import_reproduces_items() {
    let mut surface = MapSurface::default();
    let mut controller = controller_with(&[
        (ToolName::Point, 3),
        (ToolName::Polyline, 2),
        (ToolName::Polygon, 2),
        (ToolName::Circle, 2),
    ]);

    controller.set_drawing(ToolName::Point);
    click(&mut controller, &mut surface, 45.0, 7.0);
    click(&mut controller, &mut surface, 33.0, 15.0);

    controller.set_drawing(ToolName::Polyline);
    click(&mut controller, &mut surface, 45.0, 7.0);
    click(&mut controller, &mut surface, 46.0, 7.0);

    controller.set_drawing(ToolName::Polygon);
    click(&mut controller, &mut surface, 40.0, 10.0);
    click(&mut controller, &mut surface, 41.0, 10.0);
    click(&mut controller, &mut surface, 41.0, 11.0);
    controller.set_drawing(ToolName::Polygon);
    click(&mut controller, &mut surface, 30.0, 20.0);

    controller.set_drawing(ToolName::Circle);
    click(&mut controller, &mut surface, 45.0, 7.0);
    controller.pointer_moved(&mut surface, LatLng::new(45.3, 7.0));
    click(&mut controller, &mut surface, 45.3, 7.0);

    let exported = controller.export_map(&surface);
    controller.clear_map(&mut surface);
    assert!(surface.is_empty());

    assert_eq!(controller.import_map(&mut surface, &exported).unwrap(), 0);
    let reimported = controller.export_map(&surface);
    assert_eq!(reimported, exported);
    assert_eq!(reimported.point.as_ref().map(Vec::len), Some(2));
    assert_eq!(reimported.polygon.as_ref().map(Vec::len), Some(2));
    assert_eq!(surface.len(), 6);
}

#[test]
fn test_import_respects_item_cap() {
    let mut surface = MapSurface::default();
    let mut controller = controller_with(&[(ToolName::Point, 2)]);
    let snapshot = MapSnapshot {
        point: Some(vec![
            LatLng::new(1.0, 1.0),
            LatLng::new(2.0, 2.0),
            LatLng::new(3.0, 3.0),
        ]),
        ..Default::default()
    };

    assert_eq!(controller.import_map(&mut surface, &snapshot).unwrap(), 1);
    assert_eq!(item_count(&controller, ToolName::Point), 2);
    assert_eq!(controller.take_notices().len(), 1);
}

#[test]
fn test_import_skips_unregistered_tools() {
    let mut surface = MapSurface::default();
    let mut controller = controller_with(&[(ToolName::Point, 1)]);
    let snapshot = MapSnapshot {
        circle: Some(vec![CircleRecord {
            lat: 1.0,
            lng: 1.0,
            radius: 10.0,
        }]),
        ..Default::default()
    };
    assert_eq!(controller.import_map(&mut surface, &snapshot).unwrap(), 0);
    assert!(surface.is_empty());
}

#[test]
fn test_tool_rejects_snapshot_of_other_kind() {
    let mut surface = MapSurface::default();
    let mut tool = CircleTool::new(None, ToolOptions::default());
    let result = tool.import_data(
        &mut surface,
        &ToolSnapshot::Paths(vec![vec![LatLng::new(0.0, 0.0)]]),
    );
    assert!(matches!(
        result,
        Err(GeodrawerError::SnapshotMismatch {
            tool: ToolName::Circle
        })
    ));
}

#[test]
fn test_circle_import_keeps_radius() {
    let mut surface = MapSurface::default();
    let mut tool = CircleTool::new(None, ToolOptions { max_items_allowed: 2 });
    let records = vec![
        CircleRecord {
            lat: 45.0,
            lng: 7.0,
            radius: 40_000.0,
        },
        CircleRecord {
            lat: 35.0,
            lng: 15.0,
            radius: 650_000.0,
        },
    ];
    tool.import_data(&mut surface, &ToolSnapshot::Circles(records.clone()))
        .unwrap();
    assert_eq!(tool.export_data(&surface), ToolSnapshot::Circles(records.clone()));
    // Nothing is left sizing, so pointer motion changes no radius
    assert!(!tool.pointer_moved(&mut surface, LatLng::new(0.0, 0.0)));
    assert_eq!(tool.export_data(&surface), ToolSnapshot::Circles(records));
}

#[test]
fn test_extend_bounds_covers_all_tools() {
    let mut surface = MapSurface::default();
    let mut controller = controller_with(&[(ToolName::Point, 2), (ToolName::Polyline, 1)]);
    assert!(controller.extend_bounds(&surface).is_empty());

    controller.set_drawing(ToolName::Point);
    click(&mut controller, &mut surface, 45.0, 7.0);
    controller.set_drawing(ToolName::Polyline);
    click(&mut controller, &mut surface, 41.0, 10.0);
    click(&mut controller, &mut surface, 42.0, 12.0);

    let bounds = controller.extend_bounds(&surface);
    assert_eq!(bounds.south_west(), Some(LatLng::new(41.0, 7.0)));
    assert_eq!(bounds.north_east(), Some(LatLng::new(45.0, 12.0)));
}

// ============================================================================
// Controller lifecycle
// ============================================================================

#[test]
fn test_switching_drawing_tool() {
    let mut controller = controller_with(&[(ToolName::Point, 1), (ToolName::Circle, 1)]);
    assert!(controller.set_drawing(ToolName::Point));
    assert!(controller.tool(ToolName::Point).unwrap().state().is_selected());

    assert!(controller.set_drawing(ToolName::Circle));
    assert_eq!(controller.drawing_tool(), Some(ToolName::Circle));
    let point = controller.tool(ToolName::Point).unwrap().state();
    assert!(!point.is_selected());
    assert!(point.is_active());
    assert!(controller.tool(ToolName::Circle).unwrap().state().is_selected());
    assert_eq!(
        controller.tips(),
        Some("Click on the map to add circles. Right click on existing circles to delete them.")
    );
}

#[test]
fn test_switching_away_stops_circle_sizing() {
    let mut surface = MapSurface::default();
    let mut controller = controller_with(&[(ToolName::Point, 1), (ToolName::Circle, 2)]);

    controller.set_drawing(ToolName::Circle);
    click(&mut controller, &mut surface, 0.0, 0.0);
    controller.set_drawing(ToolName::Point);
    controller.set_drawing(ToolName::Circle);

    // The first circle was released, so this click starts another one
    assert!(matches!(
        click(&mut controller, &mut surface, 1.0, 1.0),
        ClickOutcome::Created(_)
    ));
}

#[test]
fn test_deactivate_is_idempotent() {
    let mut controller = controller_with(&[(ToolName::Point, 1)]);
    controller.set_drawing(ToolName::Point);

    assert!(controller.deactivate_tool(ToolName::Point, false));
    assert_eq!(controller.drawing_tool(), None);
    assert!(!controller.deactivate_tool(ToolName::Point, false));
    assert!(!controller.tool(ToolName::Point).unwrap().state().is_active());

    // An inactive tool cannot start drawing until it is activated again
    assert!(!controller.set_drawing(ToolName::Point));
    assert!(controller.activate_tool(ToolName::Point));
    assert!(controller.set_drawing(ToolName::Point));
}

#[test]
fn test_deactivate_removes_only_default_control() {
    let mut state = ToolState::new(ToolName::Point, None, ToolOptions::default());
    state.activate();
    assert_eq!(state.ctrl(), Some(&ToolControl::Default));
    state.deactivate(true);
    assert_eq!(state.ctrl(), None);

    let mut custom = ToolState::new(
        ToolName::Point,
        Some("my-point".to_string()),
        ToolOptions::default(),
    );
    custom.activate();
    custom.deactivate(true);
    assert_eq!(custom.ctrl(), Some(&ToolControl::Custom("my-point".to_string())));
}

#[test]
fn test_click_without_drawing_tool() {
    let mut surface = MapSurface::default();
    let mut controller = controller_with(&[(ToolName::Point, 1)]);
    assert!(controller.click(&mut surface, LatLng::new(0.0, 0.0)).is_none());
    assert!(surface.is_empty());
}

#[test]
fn test_secondary_click_deletes_owned_shape() {
    let mut surface = MapSurface::default();
    let mut controller = controller_with(&[(ToolName::Point, 2), (ToolName::Polygon, 1)]);

    controller.set_drawing(ToolName::Point);
    let ClickOutcome::Created(marker) = click(&mut controller, &mut surface, 45.0, 7.0) else {
        panic!("expected a marker");
    };
    controller.set_drawing(ToolName::Polygon);

    // Deletion works whichever tool is drawing
    let deleted = controller.secondary_click(&mut surface, Vec2::new(7.0, 45.0), 0.01);
    assert_eq!(deleted, Some((ToolName::Point, marker)));
    assert_eq!(item_count(&controller, ToolName::Point), 0);
    assert!(controller
        .secondary_click(&mut surface, Vec2::new(7.0, 45.0), 0.01)
        .is_none());
}

#[test]
fn test_clear_map_keeps_drawing_tool() {
    let mut surface = MapSurface::default();
    let mut controller = controller_with(&[(ToolName::Polyline, 1)]);
    controller.set_drawing(ToolName::Polyline);
    click(&mut controller, &mut surface, 1.0, 1.0);
    click(&mut controller, &mut surface, 2.0, 2.0);

    controller.clear_map(&mut surface);
    assert!(surface.is_empty());
    assert_eq!(controller.drawing_tool(), Some(ToolName::Polyline));
    assert!(controller.tips().is_some());
    assert!(matches!(
        click(&mut controller, &mut surface, 3.0, 3.0),
        ClickOutcome::Created(_)
    ));
}

#[test]
fn test_remove_tool_clears_its_shapes() {
    let mut surface = MapSurface::default();
    let mut controller = controller_with(&[(ToolName::Point, 1)]);
    controller.set_drawing(ToolName::Point);
    click(&mut controller, &mut surface, 1.0, 1.0);

    let removed = controller.remove_tool(ToolName::Point, &mut surface);
    assert!(removed.is_some());
    assert!(surface.is_empty());
    assert_eq!(controller.drawing_tool(), None);
    assert!(controller.tool(ToolName::Point).is_none());
}

#[test]
fn test_tips_disabled() {
    let mut options = options_with(&[(ToolName::Point, 1)]);
    options.tips_map_ctrl = ControlSetting::Disabled;
    let mut controller = MapController::from_options(&options).unwrap();
    controller.set_drawing(ToolName::Point);
    assert_eq!(controller.tips(), None);
}

// ============================================================================
// Configuration errors
// ============================================================================

#[test]
fn test_unknown_tool_ctrl_is_fatal() {
    let mut tools = BTreeMap::new();
    tools.insert(
        "polygon".to_string(),
        ToolConfig {
            ctrl: Some("missing".to_string()),
            options: ToolOptions::default(),
        },
    );
    let options = MapOptions {
        tools,
        ..Default::default()
    };
    assert!(matches!(
        MapController::from_options(&options),
        Err(GeodrawerError::ControllerNotFound {
            tool: ToolName::Polygon
        })
    ));
}

#[test]
fn test_unsupported_tool_kind_is_fatal() {
    let mut options = options_with(&[(ToolName::Point, 1)]);
    options
        .tools
        .insert("rectangle".to_string(), ToolConfig::default());
    assert!(matches!(
        MapController::from_options(&options),
        Err(GeodrawerError::UnsupportedTool(name)) if name == "rectangle"
    ));
}

#[test]
fn test_unsupported_tool_kind_from_config_json() {
    let options: MapOptions = serde_json::from_str(r#"{"tools": {"rectangle": {}}}"#).unwrap();
    assert!(matches!(
        MapController::from_options(&options),
        Err(GeodrawerError::UnsupportedTool(_))
    ));
}

#[test]
fn test_unknown_map_control_is_fatal() {
    let mut options = options_with(&[]);
    options.export_map_ctrl = ControlSetting::Custom("nowhere".to_string());
    assert!(matches!(
        MapController::from_options(&options),
        Err(GeodrawerError::ControlNotFound { .. })
    ));
}

#[test]
fn test_custom_controls_bind() {
    let mut options = options_with(&[]);
    options.custom_controls = vec![
        CustomControl {
            id: "my-point".to_string(),
            label: "Add point".to_string(),
        },
        CustomControl {
            id: "my-clear".to_string(),
            label: "Wipe".to_string(),
        },
    ];
    options.tools.insert(
        "point".to_string(),
        ToolConfig {
            ctrl: Some("my-point".to_string()),
            options: ToolOptions::default(),
        },
    );
    options.clear_map_ctrl = ControlSetting::Custom("my-clear".to_string());

    let controller = MapController::from_options(&options).unwrap();
    assert_eq!(
        controller.control_binding("my-point"),
        Some(ControlBinding::Tool(ToolName::Point))
    );
    assert_eq!(
        controller.control_binding("my-clear"),
        Some(ControlBinding::Map(MapControl::ClearMap))
    );
    assert_eq!(controller.control_binding("other"), None);
}

#[test]
fn test_add_tool_named() {
    let mut controller = MapController::default();
    assert!(matches!(
        controller.add_tool_named("rectangle", &ToolConfig::default()),
        Err(GeodrawerError::UnsupportedTool(name)) if name == "rectangle"
    ));

    let replaced = controller
        .add_tool_named("circle", &ToolConfig::default())
        .unwrap();
    assert!(replaced.is_none());
    assert!(controller.tool(ToolName::Circle).unwrap().state().is_active());

    let replaced = controller
        .add_tool_named("circle", &ToolConfig::default())
        .unwrap();
    assert!(replaced.is_some_and(|old| !old.state().is_active()));
}

#[test]
fn test_owner_lookup() {
    let mut surface = MapSurface::default();
    let mut controller = controller_with(&[(ToolName::Point, 1)]);
    controller.set_drawing(ToolName::Point);
    let ClickOutcome::Created(marker) = click(&mut controller, &mut surface, 0.0, 0.0) else {
        panic!("expected a marker");
    };
    assert_eq!(controller.owner_of(marker), Some(ToolName::Point));
    assert_eq!(controller.owner_of(ShapeId(999)), None);
}
