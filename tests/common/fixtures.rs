use std::sync::Arc;

use deckpack::model::{
    Alignment, Border, Bullet, Chart, ChartSeries, ChartType, Color, Fill, Font, Frame, Geometry,
    GraphicStyle, Hyperlink, MediaSource, Paragraph, ParagraphStyle, Presentation, Shape, ShapeKind, Slide,
    TextBody, TextRun, Underline,
};

pub const FRAME: Frame = Frame::new(914_400, 914_400, 3_657_600, 1_828_800);

/// A PNG signature followed by an empty IHDR-sized tail
pub fn png_bytes() -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&[0; 17]);
    data
}

pub fn revenue_chart() -> Chart {
    Chart::new(
        ChartType::Column,
        vec!["Q1".to_string(), "Q2".to_string(), "Q3".to_string()],
        vec![
            ChartSeries::new("Revenue", vec![120.0, 135.5, 150.25]),
            ChartSeries::new("Costs", vec![80.0, 82.0, 90.0]),
        ],
    )
    .with_title("Revenue")
}

/// One logo on three shapes across two slides
pub fn deck_with_shared_logo() -> Presentation {
    let logo: Arc<[u8]> = png_bytes().into();
    let mut presentation = Presentation::new().with_title("Shared logo");
    presentation.add_slide(Slide::new(vec![
        Shape::picture("Logo", FRAME, MediaSource::Bytes(logo.clone())),
        Shape::picture("Logo copy", FRAME, MediaSource::Bytes(logo.clone())),
    ]));
    presentation.add_slide(Slide::new(vec![Shape::picture(
        "Logo",
        FRAME,
        MediaSource::Bytes(logo),
    )]));
    presentation
}

/// Ten paragraphs that all use the same font
pub fn deck_with_font_list() -> Presentation {
    let font = Font::new("Arial", 24.0).color(Color::rgb(0x1F, 0x3B, 0x73));
    let paragraphs = (1..=10)
        .map(|i| Paragraph::new(vec![TextRun::new(format!("Point {i}"), font.clone())]))
        .collect();

    let mut presentation = Presentation::new();
    presentation.add_slide(Slide::new(vec![Shape::text_box(
        "Points",
        FRAME,
        TextBody::new(paragraphs),
    )]));
    presentation
}

/// A deck touching every shape kind, link kind and style family
pub fn full_deck() -> Presentation {
    let logo: Arc<[u8]> = png_bytes().into();
    let title_font = Font::new("Calibri Light", 40.0).bold(true);
    let body_font = Font::new("Calibri", 18.0);

    let bullets = TextBody::new(vec![
        Paragraph::new(vec![TextRun::new("Growth", body_font.clone())])
            .with_bullet(Bullet::char('•')),
        Paragraph::new(vec![
            TextRun::new("See ", body_font.clone()),
            TextRun::new("the appendix", body_font.clone().underline(Underline::Single))
                .with_hyperlink(Hyperlink::slide(1).with_tooltip("Appendix")),
        ])
        .with_bullet(Bullet::char('•')),
    ]);

    let mut badge = Shape::auto_shape(
        "Badge",
        Frame::new(0, 0, 914_400, 914_400),
        Geometry::RoundRectangle,
        GraphicStyle {
            fill: Fill::Gradient {
                start: Color::rgb(0x44, 0x72, 0xC4),
                end: Color::WHITE,
                angle: 45,
            },
            border: Some(Border::default()),
        },
    )
    .with_hyperlink(Hyperlink::url("https://example.com/report"));
    if let ShapeKind::AutoShape { body, .. } = &mut badge.kind {
        *body = Some(TextBody::plain("New", body_font.clone()));
    }

    let title = TextBody::new(vec![
        Paragraph::new(vec![TextRun::new("Q3 review", title_font)]).with_style(ParagraphStyle {
            alignment: Alignment::Center,
            space_after: 600,
            ..ParagraphStyle::default()
        }),
    ]);

    let mut presentation = Presentation::new().with_title("Quarterly review");
    presentation.add_slide(
        Slide::new(vec![
            Shape::text_box("Title", FRAME, title),
            Shape::text_box("Body", FRAME, bullets),
            Shape::group(
                "Group",
                FRAME,
                vec![badge, Shape::picture("Logo", FRAME, MediaSource::Bytes(logo.clone()))],
            ),
            Shape::chart("Chart", FRAME, revenue_chart()),
        ])
        .with_name("Summary")
        .with_background(Fill::Solid(Color::rgb(0xF2, 0xF2, 0xF2))),
    );
    presentation.add_slide(
        Slide::new(vec![
            Shape::text_box(
                "Title",
                FRAME,
                TextBody::plain("Appendix", Font::new("Calibri Light", 40.0).bold(true)),
            ),
            Shape::picture("Logo", FRAME, MediaSource::Bytes(logo)),
        ])
        .with_name("Appendix"),
    );
    presentation
}
