//! Request flow through the DNS lab, from the external user back to the
//! response.

use labdraw_core::{
    color::Color,
    draw::{
        ArrowDirection, Connector, ConnectorDefinition, ConnectorLabel, HorizontalAlign::Center,
        Shape, StrokeDefinition, TextBackground, VerticalAlign,
    },
    geometry::{Point, Size},
    scene::{Canvas, Scene},
};

use super::{label, outlined, palette::Palette, rect, text_style, translucent};

/// Name of the flow scene.
pub const NAME: &str = "gcp-dns-lab-flow";

const STEP_SIZE: Size = Size::new(2.4, 1.6);
const STEP_BADGE_RADIUS: f32 = 0.2;
/// Distance from a connector midpoint to its label.
const LABEL_OFFSET: f32 = 0.4;
const SIDE_LABEL_OFFSET: f32 = 0.8;
/// Gap between an arrow end and its anchor point, in points.
const ARROW_SHRINK: f32 = 5.0;

/// One processing stage of the request.
struct Step {
    center: Point,
    title: &'static str,
    details: &'static str,
    color: Color,
}

/// Builds the 20 x 12 flow scene.
pub fn flow() -> Scene {
    let p = Palette::gcp();
    let mut scene = Scene::new(NAME, Canvas::new(Size::new(20.0, 12.0)));

    scene.add_shape(rect(
        1.0,
        10.5,
        18.0,
        1.2,
        translucent(outlined(p.gcp_blue, p.gcp_blue, 1.0), 0.1),
    ));
    scene.add_label(label(
        10.0,
        11.1,
        "GCP DNS Lab - Professional Network Flow Architecture",
        &text_style(18.0, true, Center, Some(p.gcp_blue)),
    ));
    scene.add_label(label(
        10.0,
        10.7,
        "Request Processing & Data Flow Patterns",
        &text_style(12.0, false, Center, Some(p.text_secondary)),
    ));

    for (index, step) in steps(&p).iter().enumerate() {
        add_step(&mut scene, &p, index + 1, step);
    }
    add_connections(&mut scene, &p);
    add_performance_panel(&mut scene, &p);

    scene
}

fn steps(p: &Palette) -> [Step; 7] {
    let step = |x, y, title, details, color| Step {
        center: Point::new(x, y),
        title,
        details,
        color,
    };

    [
        step(
            3.0,
            8.5,
            "External User\nRequest",
            "HTTPS Request\nwww.example.com",
            p.internet,
        ),
        step(
            10.0,
            8.5,
            "Global Load Balancer\n& Cloud Armor",
            "SSL Termination\nWAF Security Check\nHealth Check",
            p.security,
        ),
        step(
            17.0,
            8.5,
            "Web Tier\nNginx Servers",
            "Static Content\nReverse Proxy\nLoad Distribution",
            p.subnet_web,
        ),
        step(
            17.0,
            6.0,
            "Application Tier\nNode.js Servers",
            "Business Logic\nAPI Processing\nSession Management",
            p.subnet_app,
        ),
        step(
            17.0,
            3.5,
            "Database Tier\nPostgreSQL",
            "Data Storage\nQuery Processing\nTransaction Management",
            p.subnet_db,
        ),
        step(
            10.0,
            2.0,
            "DNS Resolution\nServices",
            "Private Zone\nPublic Zone\nService Discovery",
            p.gcp_blue,
        ),
        step(
            3.0,
            2.0,
            "Response\nDelivery",
            "JSON/HTML Response\nCaching Headers\nCompression",
            p.internet,
        ),
    ]
}

/// Draws a step box with its numbered badge, title and details.
fn add_step(scene: &mut Scene, p: &Palette, number: usize, step: &Step) {
    let Step {
        center,
        title,
        details,
        color,
    } = *step;

    scene.add_shape(rect(
        center.x() - STEP_SIZE.width() / 2.0,
        center.y() - STEP_SIZE.height() / 2.0,
        STEP_SIZE.width(),
        STEP_SIZE.height(),
        translucent(outlined(color, color, 2.0), 0.2),
    ));

    let badge = center.add_point(Point::new(-0.8, 0.5));
    scene.add_shape(Shape::circle(
        badge,
        STEP_BADGE_RADIUS,
        outlined(p.gcp_blue, p.white, 2.0),
    ));
    let mut number_style = text_style(10.0, true, Center, Some(p.white));
    number_style.set_valign(VerticalAlign::Center);
    scene.add_label(label(
        badge.x(),
        badge.y(),
        &number.to_string(),
        &number_style,
    ));

    scene.add_label(label(
        center.x(),
        center.y() + 0.3,
        title,
        &text_style(11.0, true, Center, Some(p.text_primary)),
    ));
    scene.add_label(label(
        center.x(),
        center.y() - 0.3,
        details,
        &text_style(9.0, false, Center, Some(p.text_secondary)),
    ));
}

/// The labelled arrows between steps. The last one closes the round trip
/// and points back at the user.
fn add_connections(scene: &mut Scene, p: &Palette) {
    let connections = [
        ((4.2, 8.5), (8.8, 8.5), "DNS Resolution\n& Routing"),
        ((11.2, 8.5), (15.8, 8.5), "Load Balanced\nHTTP Request"),
        ((17.0, 7.7), (17.0, 6.8), "API Call\nProxy"),
        ((17.0, 5.2), (17.0, 4.3), "Database\nQuery"),
        ((15.8, 3.5), (11.2, 2.5), "Service\nDiscovery"),
        ((8.8, 2.0), (4.2, 2.0), "Formatted\nResponse"),
        ((3.0, 2.8), (3.0, 7.7), "Complete\nRound Trip"),
    ];
    let return_index = connections.len() - 1;

    for (index, ((x1, y1), (x2, y2), text)) in connections.into_iter().enumerate() {
        let is_return = index == return_index;
        let (color, direction) = if is_return {
            (p.gcp_red, ArrowDirection::Backward)
        } else {
            (p.gcp_green, ArrowDirection::Forward)
        };

        let mut def = ConnectorDefinition::new(StrokeDefinition::solid(color, 2.0));
        def.set_head_size(20.0);
        def.set_shrink(ARROW_SHRINK, ARROW_SHRINK);

        let offset = if y1 == y2 {
            Point::new(0.0, LABEL_OFFSET)
        } else if is_return {
            Point::new(SIDE_LABEL_OFFSET, 0.0)
        } else {
            Point::new(-SIDE_LABEL_OFFSET, 0.0)
        };

        let mut label_style = text_style(8.0, false, Center, None);
        label_style.set_background(Some(
            TextBackground::new(p.white)
                .with_opacity(0.8)
                .with_pad(0.2)
                .with_border(StrokeDefinition::solid(color, 1.0)),
        ));

        scene.add_connector(
            Connector::new(Point::new(x1, y1), Point::new(x2, y2), direction, def)
                .with_label(ConnectorLabel::new(text, offset, label_style)),
        );
    }
}

/// Latency targets along the bottom of the scene.
fn add_performance_panel(scene: &mut Scene, p: &Palette) {
    scene.add_shape(rect(
        1.0,
        0.2,
        18.0,
        1.0,
        translucent(outlined(p.gcp_yellow, p.gcp_yellow, 1.0), 0.1),
    ));
    scene.add_label(label(
        10.0,
        0.9,
        "Performance Metrics & SLA Targets",
        &text_style(12.0, true, Center, None),
    ));

    let metric = text_style(9.0, false, Center, Some(p.text_secondary));
    let targets = [
        (4.0, "DNS Resolution: <50ms"),
        (8.0, "Load Balancer: <100ms"),
        (12.0, "Application: <200ms"),
        (16.0, "Database Query: <50ms"),
    ];
    for (x, text) in targets {
        scene.add_label(label(x, 0.5, text, &metric));
    }
}
