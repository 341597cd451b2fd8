//! Infrastructure topology of the DNS lab.

use labdraw_core::{
    color::Color,
    draw::{
        ArrowDirection, Connector, ConnectorDefinition, Legend, LegendEntry, StrokeDefinition,
        TextDefinition,
    },
    geometry::{Point, Size},
    scene::{Canvas, Scene},
};

use super::{label, outlined, palette::Palette, rect, text_style, translucent};

use labdraw_core::draw::HorizontalAlign::{Center, Left, Right};

/// Name of the architecture scene.
pub const NAME: &str = "gcp-dns-lab-architecture";

/// Builds the 24 x 16 architecture scene.
pub fn architecture() -> Scene {
    let p = Palette::gcp();
    let mut scene = Scene::new(NAME, Canvas::new(Size::new(24.0, 16.0)));

    add_header(&mut scene, &p);
    add_project(&mut scene, &p);
    add_subnets(&mut scene, &p);
    add_dns_services(&mut scene, &p);
    add_security_layer(&mut scene, &p);
    add_arrows(&mut scene, &p);
    add_legend(&mut scene, &p);

    // Zone indicators
    let mut zone = text_style(8.0, false, Right, Some(p.text_secondary));
    zone.set_rotation(90.0);
    for (y, name) in [(7.0, "us-central1-a"), (5.0, "us-central1-b"), (3.0, "us-central1-c")] {
        scene.add_label(label(23.0, y, &format!("Zone: {name}"), &zone));
    }

    scene
}

/// Title banner, internet zone, public DNS and the global load balancer.
fn add_header(scene: &mut Scene, p: &Palette) {
    scene.add_shape(rect(
        1.0,
        14.5,
        22.0,
        1.2,
        translucent(outlined(p.gcp_blue, p.gcp_blue, 1.0), 0.1),
    ));
    scene.add_label(label(
        12.0,
        15.1,
        "Google Cloud Platform - DNS Lab Architecture",
        &text_style(20.0, true, Center, Some(p.gcp_blue)),
    ));
    scene.add_label(label(
        12.0,
        14.7,
        "Multi-Tier Web Application with Comprehensive Security & DNS Management",
        &text_style(12.0, false, Center, Some(p.text_secondary)),
    ));

    scene.add_shape(rect(1.0, 12.5, 22.0, 1.5, outlined(p.internet, p.border, 1.5)));
    scene.add_label(label(
        2.0,
        13.6,
        "Internet / External Users",
        &text_style(14.0, true, Left, Some(p.text_primary)),
    ));
    scene.add_label(label(
        2.0,
        13.2,
        "Global Access Point",
        &text_style(10.0, false, Left, Some(p.text_secondary)),
    ));

    scene.add_shape(rect(18.0, 12.8, 4.0, 0.9, outlined(p.white, p.gcp_blue, 1.0)));
    scene.add_label(label(
        20.0,
        13.25,
        "Public DNS",
        &text_style(10.0, true, Center, None),
    ));
    scene.add_label(label(
        20.0,
        13.05,
        "example.com",
        &text_style(9.0, false, Center, Some(p.text_secondary)),
    ));

    let detail = text_style(10.0, false, Center, Some(p.text_secondary));
    let address = text_style(9.0, false, Center, Some(p.text_secondary));
    scene.add_shape(rect(8.0, 10.5, 8.0, 1.5, outlined(p.security, p.gcp_red, 2.0)));
    scene.add_label(label(
        12.0,
        11.6,
        "Global HTTP(S) Load Balancer",
        &text_style(12.0, true, Center, None),
    ));
    scene.add_label(label(
        12.0,
        11.3,
        "Cloud Armor WAF • SSL Termination • CDN",
        &detail,
    ));
    scene.add_label(label(12.0, 11.0, "IP: 34.102.136.180", &address));
}

/// Project frame, shared VPC and Cloud NAT.
fn add_project(scene: &mut Scene, p: &Palette) {
    let secondary = text_style(10.0, false, Left, Some(p.text_secondary));

    scene.add_shape(rect(0.5, 0.5, 23.0, 9.5, outlined(p.white, p.gcp_blue, 3.0)));
    scene.add_label(label(
        1.0,
        9.7,
        "Google Cloud Project",
        &text_style(16.0, true, Left, Some(p.gcp_blue)),
    ));
    scene.add_label(label(1.0, 9.3, "Project ID: your-gcp-project-id", &secondary));

    scene.add_shape(rect(1.0, 1.0, 22.0, 8.0, outlined(p.vpc, p.gcp_green, 2.0)));
    scene.add_label(label(
        1.5,
        8.7,
        "Shared VPC Network",
        &text_style(14.0, true, Left, Some(p.gcp_green)),
    ));
    scene.add_label(label(
        1.5,
        8.4,
        "CIDR: 10.0.0.0/8 • Region: us-central1",
        &secondary,
    ));

    scene.add_shape(rect(19.0, 7.5, 3.5, 1.0, outlined(p.white, p.gcp_blue, 1.0)));
    scene.add_label(label(
        20.75,
        8.1,
        "Cloud NAT",
        &text_style(10.0, true, Center, None),
    ));
    scene.add_label(label(
        20.75,
        7.8,
        "Outbound Internet",
        &text_style(8.0, false, Center, Some(p.text_secondary)),
    ));
}

struct Instance {
    x: f32,
    width: f32,
    name: &'static str,
    software: &'static str,
    address: &'static str,
}

const INSTANCE_Y: f32 = 6.2;
const INSTANCE_HEIGHT: f32 = 0.8;

const INSTANCES: [Instance; 5] = [
    Instance {
        x: 2.5,
        width: 2.2,
        name: "web-1",
        software: "Nginx",
        address: "10.0.1.10",
    },
    Instance {
        x: 5.3,
        width: 2.2,
        name: "web-2",
        software: "Nginx",
        address: "10.0.1.11",
    },
    Instance {
        x: 9.5,
        width: 2.2,
        name: "app-1",
        software: "Node.js",
        address: "10.0.2.10",
    },
    Instance {
        x: 12.3,
        width: 2.2,
        name: "app-2",
        software: "Node.js",
        address: "10.0.2.11",
    },
    Instance {
        x: 17.0,
        width: 3.5,
        name: "db-1",
        software: "PostgreSQL 14",
        address: "10.0.3.10",
    },
];

/// The three tier subnets with their compute instances and the bastion host.
fn add_subnets(scene: &mut Scene, p: &Palette) {
    let title = text_style(12.0, true, Center, None);
    let range = text_style(9.0, false, Center, Some(p.text_secondary));

    let subnets = [
        (
            2.0,
            p.subnet_web,
            "Web Tier Subnet",
            "10.0.1.0/24 • us-central1-a,b,c",
        ),
        (
            9.0,
            p.subnet_app,
            "Application Tier Subnet",
            "10.0.2.0/24 • us-central1-a,b,c",
        ),
        (
            16.0,
            p.subnet_db,
            "Database Tier Subnet",
            "10.0.3.0/24 • us-central1-a",
        ),
    ];
    for (x, fill, name, cidr) in subnets {
        scene.add_shape(rect(x, 5.5, 6.0, 2.5, outlined(fill, p.gcp_blue, 1.5)));
        scene.add_label(label(x + 3.0, 7.7, name, &title));
        scene.add_label(label(x + 3.0, 7.4, cidr, &range));
    }

    let name = text_style(10.0, true, Center, None);
    let detail = text_style(8.0, false, Center, Some(p.text_secondary));
    for instance in &INSTANCES {
        scene.add_shape(rect(
            instance.x,
            INSTANCE_Y,
            instance.width,
            INSTANCE_HEIGHT,
            outlined(p.compute, p.gcp_red, 1.5),
        ));
        let center = instance.x + instance.width / 2.0;
        scene.add_label(label(center, 6.7, instance.name, &name));
        scene.add_label(label(center, 6.5, instance.software, &detail));
        scene.add_label(label(center, 6.3, instance.address, &detail));
    }

    scene.add_shape(rect(2.5, 5.7, 2.2, 0.4, outlined(p.security, p.gcp_yellow, 1.5)));
    scene.add_label(label(
        3.6,
        5.9,
        "bastion",
        &text_style(9.0, true, Center, None),
    ));
    scene.add_label(label(
        3.6,
        5.8,
        "SSH Gateway",
        &text_style(7.0, false, Center, Some(p.text_secondary)),
    ));
}

/// Cloud DNS with its private and public zones.
fn add_dns_services(scene: &mut Scene, p: &Palette) {
    scene.add_shape(rect(2.0, 3.5, 20.0, 1.5, outlined(p.white, p.gcp_blue, 1.5)));
    scene.add_label(label(
        12.0,
        4.7,
        "Google Cloud DNS Services",
        &text_style(14.0, true, Center, Some(p.gcp_blue)),
    ));

    let title = text_style(11.0, true, Center, None);
    let domain = text_style(9.0, false, Center, Some(p.text_secondary));
    let scope = text_style(8.0, false, Center, Some(p.text_secondary));

    let zones = [
        (
            3.0,
            p.subnet_web,
            "Private DNS Zone",
            "internal.example.com",
            "VPC-scoped resolution",
        ),
        (
            13.0,
            p.subnet_app,
            "Public DNS Zone",
            "example.com",
            "Internet-wide resolution",
        ),
    ];
    for (x, fill, name, zone, resolution) in zones {
        scene.add_shape(rect(x, 3.8, 8.0, 0.9, outlined(fill, p.gcp_blue, 1.0)));
        scene.add_label(label(x + 4.0, 4.4, name, &title));
        scene.add_label(label(x + 4.0, 4.2, zone, &domain));
        scene.add_label(label(x + 4.0, 4.0, resolution, &scope));
    }
}

/// Firewall, IAM, monitoring and storage boxes.
fn add_security_layer(scene: &mut Scene, p: &Palette) {
    scene.add_shape(rect(2.0, 2.0, 20.0, 1.2, outlined(p.security, p.gcp_yellow, 1.5)));
    scene.add_label(label(
        12.0,
        2.9,
        "Security & Management Layer",
        &text_style(14.0, true, Center, Some(p.text_primary)),
    ));

    let name = text_style(9.0, true, Center, None);
    let services = [
        (3.0, 4.0, "VPC Firewall Rules"),
        (8.0, 4.0, "IAM & Service Accounts"),
        (13.0, 4.0, "Cloud Ops Suite"),
        (18.0, 3.0, "Persistent Disks"),
    ];
    for (x, width, service) in services {
        scene.add_shape(rect(x, 2.2, width, 0.6, outlined(p.white, p.gcp_red, 1.0)));
        scene.add_label(label(x + width / 2.0, 2.5, service, &name));
    }
}

/// Traffic path from the internet down to the database tier.
fn add_arrows(scene: &mut Scene, p: &Palette) {
    let arrows = [
        ((12.0, 12.5), (12.0, 12.0), p.gcp_blue, 25.0, 2.0),
        ((12.0, 10.5), (5.0, 8.0), p.gcp_red, 25.0, 2.0),
        ((8.0, 6.6), (9.5, 6.6), p.gcp_green, 20.0, 1.5),
        ((14.5, 6.6), (17.0, 6.6), p.gcp_green, 20.0, 1.5),
    ];
    for ((x1, y1), (x2, y2), color, head_size, width) in arrows {
        let mut def = ConnectorDefinition::new(StrokeDefinition::solid(color, width));
        def.set_head_size(head_size);
        scene.add_connector(Connector::new(
            Point::new(x1, y1),
            Point::new(x2, y2),
            ArrowDirection::Forward,
            def,
        ));
    }
}

fn add_legend(scene: &mut Scene, p: &Palette) {
    scene.add_shape(rect(0.5, 0.2, 23.0, 0.6, outlined(p.white, p.border, 1.0)));

    let mut text = TextDefinition::new();
    text.set_font_size(9.0);
    text.set_color(Some(p.text_primary));

    let entries: [(f32, Color, &str); 5] = [
        (2.0, p.gcp_blue, "Network Infrastructure"),
        (6.0, p.gcp_red, "Compute Resources"),
        (10.0, p.gcp_green, "Data Flow"),
        (14.0, p.gcp_yellow, "Security Layer"),
        (18.0, p.security, "Management Services"),
    ];

    let mut legend = Legend::new(text);
    for (x, color, name) in entries {
        legend.add_entry(LegendEntry::new(Point::new(x, 0.5), color, name));
    }
    scene.add_legend(legend);
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::diagrams::filled;

    #[test]
    fn test_architecture_contents() {
        let scene = architecture();
        assert_eq!(scene.name(), NAME);
        assert_eq!(scene.canvas().size(), Size::new(24.0, 16.0));

        // 1 title, 2 internet/dns, 1 lb, 3 project/vpc/nat, 3 subnets,
        // 5 instances, 1 bastion, 3 dns, 5 security, 1 legend frame
        assert_eq!(scene.shapes().count(), 25);
        assert_eq!(scene.connectors().count(), 4);
        assert!(scene.elements().iter().any(|element| matches!(
            element,
            labdraw_core::scene::Element::Legend(legend) if legend.entries().len() == 5
        )));

        let texts: Vec<&str> = scene.labels().map(|label| label.content()).collect();
        assert!(texts.contains(&"Global HTTP(S) Load Balancer"));
        assert!(texts.contains(&"PostgreSQL 14"));
        assert!(texts.contains(&"Zone: us-central1-c"));
    }

    #[test]
    fn test_instance_labels_are_centered_on_boxes() {
        let expected = [3.6, 6.4, 10.6, 13.4, 18.75];
        for (instance, center) in INSTANCES.iter().zip(expected) {
            assert_approx_eq!(f32, instance.x + instance.width / 2.0, center, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_zone_labels_are_rotated() {
        let scene = architecture();
        let zones: Vec<_> = scene
            .labels()
            .filter(|label| label.content().starts_with("Zone:"))
            .collect();
        assert_eq!(zones.len(), 3);
        for zone in zones {
            assert_eq!(zone.definition().rotation(), 90.0);
            assert_eq!(zone.definition().halign(), Right);
        }
    }

    #[test]
    fn test_title_box_is_translucent() {
        let scene = architecture();
        let title = scene.shapes().next().unwrap();
        assert_eq!(title.definition().opacity(), 0.1);
        assert_eq!(title.definition().fill_color(), Some(Palette::gcp().gcp_blue));
    }

    #[test]
    fn test_filled_has_no_border() {
        assert!(filled(Color::white()).stroke().is_none());
    }
}
