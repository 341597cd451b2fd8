//! Example: Building and exporting a scene by hand
//!
//! This example draws a small two-tier topology with a connector and a
//! legend, then writes it as SVG, PNG and PDF next to the working directory.

use labdraw::{
    Crop, OutputFormat, OutputTarget, SceneRenderer,
    config::AppConfig,
    diagrams::palette::Palette,
    draw::{
        ArrowDirection, Connector, ConnectorDefinition, ConnectorLabel, HorizontalAlign, Label,
        Legend, LegendEntry, Shape, ShapeDefinition, StrokeDefinition, TextDefinition,
    },
    geometry::{Point, Size},
    scene::{Canvas, Scene},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building scene...\n");

    let palette = Palette::gcp();
    let mut scene = Scene::new("two-tier", Canvas::new(Size::new(10.0, 5.0)));

    let mut centered = TextDefinition::new();
    centered.set_halign(HorizontalAlign::Center);
    centered.set_bold(true);

    // Two tier boxes
    for (x, fill, name) in [
        (1.0, palette.subnet_web, "Web Tier"),
        (6.0, palette.subnet_db, "Database Tier"),
    ] {
        let mut def = ShapeDefinition::new();
        def.set_fill_color(Some(fill));
        def.set_stroke(Some(StrokeDefinition::solid(palette.gcp_blue, 1.5)));
        scene.add_shape(Shape::rectangle(
            Point::new(x, 2.0),
            Size::new(3.0, 1.5),
            def,
        ));
        scene.add_label(Label::new(
            name,
            Point::new(x + 1.5, 2.7),
            centered.clone(),
        ));
    }

    // Query path between them
    let mut arrow = ConnectorDefinition::new(StrokeDefinition::solid(palette.gcp_green, 2.0));
    arrow.set_shrink(5.0, 5.0);
    let mut small = TextDefinition::new();
    small.set_font_size(8.0);
    small.set_halign(HorizontalAlign::Center);
    scene.add_connector(
        Connector::new(
            Point::new(4.0, 2.75),
            Point::new(6.0, 2.75),
            ArrowDirection::Forward,
            arrow,
        )
        .with_label(ConnectorLabel::new("SQL", Point::new(0.0, 0.3), small)),
    );

    let mut legend = Legend::new(TextDefinition::new());
    legend.add_entry(LegendEntry::new(
        Point::new(1.5, 0.8),
        palette.gcp_green,
        "Data Flow",
    ));
    scene.add_legend(legend);

    let renderer = SceneRenderer::new(AppConfig::default());
    let targets = [
        OutputTarget::new("two-tier.svg", OutputFormat::Svg),
        OutputTarget::new("two-tier.png", OutputFormat::Png).with_crop(Crop::tight()),
        OutputTarget::new("two-tier.pdf", OutputFormat::Pdf).with_crop(Crop::tight()),
    ];
    renderer.render(&scene, &targets)?;

    for target in &targets {
        println!("- {}", target.path().display());
    }

    Ok(())
}
