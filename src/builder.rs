//! Report assembly: cover, full disclosure, one page group per table, outro.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use crate::assets::Assets;
use crate::canvas::{Canvas, PdfCanvas};
use crate::config::{resolve_asset_directory, ReportConfig};
use crate::context::RenderContext;
use crate::error::ReportError;
use crate::layout::PageGeometry;
use crate::payload::ReportPayload;
use crate::sections::disposal::DisposalKind;
use crate::sections::{self, cards, cover, disposal, outro, spills, waste};

/// Title of the cover entry in the section list.
pub const COVER_SECTION: &str = "Cover";
/// Title of the contact page entry in the section list.
pub const CONTACT_SECTION: &str = "Contact";

/// A report section and the zero-based page it starts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionMark {
    pub title: String,
    pub page: usize,
}

impl SectionMark {
    fn new(title: impl Into<String>, page: usize) -> Self {
        Self {
            title: title.into(),
            page,
        }
    }
}

/// A finished PDF document.
#[derive(Clone, Debug)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub sections: Vec<SectionMark>,
}

/// Builder for GRI waste reports.
///
/// Holds configuration only; every render call loads its own assets and owns
/// its own drawing surface.
#[derive(Clone, Debug, Default)]
pub struct ReportBuilder {
    config: ReportConfig,
    asset_dir: Option<PathBuf>,
    geometry: PageGeometry,
    #[cfg(feature = "bookmarks")]
    bookmarks: bool,
}

impl ReportBuilder {
    /// Creates a builder with the default configuration and page geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the organisation, titles and contact details printed in the report.
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Reads fonts and images from `dir` instead of the discovered asset directory.
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = Some(dir.into());
        self
    }

    /// Overrides the landscape page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Adds a PDF outline with one entry per section.
    #[cfg(feature = "bookmarks")]
    pub fn with_bookmarks(mut self, enabled: bool) -> Self {
        self.bookmarks = enabled;
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    fn load_assets(&self) -> Assets {
        Assets::load(resolve_asset_directory(self.asset_dir.as_deref()).as_deref())
    }

    /// Renders `payload` into a PDF document.
    pub fn render(&self, payload: &ReportPayload) -> Result<RenderedReport, ReportError> {
        self.geometry.validate()?;
        let assets = self.load_assets();

        let mut canvas = PdfCanvas::new(&self.config.report_title, &self.geometry, &assets.fonts)?;
        let sections = self.draw(payload, &assets, &mut canvas)?;
        let page_count = canvas.page_count();
        let bytes = canvas.finish()?;

        #[cfg(feature = "bookmarks")]
        let bytes = if self.bookmarks {
            crate::bookmarks::apply_section_bookmarks(&bytes, &sections)?
        } else {
            bytes
        };

        info!(
            "Rendered report for {} with {} pages ({} bytes)",
            self.config.effective_year(payload.year.as_deref()),
            page_count,
            bytes.len()
        );

        Ok(RenderedReport {
            bytes,
            page_count,
            sections,
        })
    }

    /// Draws `payload` on any canvas, returning where each section starts.
    pub fn render_on<C: Canvas>(
        &self,
        payload: &ReportPayload,
        canvas: &mut C,
    ) -> Result<Vec<SectionMark>, ReportError> {
        self.geometry.validate()?;
        let assets = self.load_assets();
        self.draw(payload, &assets, canvas)
    }

    fn draw(
        &self,
        payload: &ReportPayload,
        assets: &Assets,
        canvas: &mut dyn Canvas,
    ) -> Result<Vec<SectionMark>, ReportError> {
        let year = self.config.effective_year(payload.year.as_deref());
        let mut ctx = RenderContext::new(canvas, assets, &self.config, self.geometry, year);
        let mut marks = Vec::new();

        marks.push(SectionMark::new(COVER_SECTION, ctx.page_count()));
        cover::draw_cover(&mut ctx)?;

        marks.push(SectionMark::new(sections::SECTION_HEADING, ctx.page_count()));
        let top = ctx.begin_content_page()?;
        let top = sections::draw_section_heading(&mut ctx, top);
        let top = cards::draw_summary_cards(&mut ctx, &payload.summary, top);
        match &payload.waste_composition {
            Some(composition) => {
                marks.push(SectionMark::new(waste::TITLE, ctx.page_count() - 1));
                waste::render(&mut ctx, composition, top)?;
            }
            None => debug!("No waste composition; skipping '{}'", waste::TITLE),
        }
        ctx.finish_content_page();

        for (kind, breakdown) in [
            (DisposalKind::Diverted, &payload.diverted),
            (DisposalKind::Directed, &payload.directed),
        ] {
            let Some(breakdown) = breakdown else {
                debug!("No data; skipping '{}'", kind.title());
                continue;
            };
            marks.push(SectionMark::new(kind.title(), ctx.page_count()));
            let top = ctx.begin_content_page()?;
            disposal::render(&mut ctx, kind, breakdown, top)?;
            ctx.finish_content_page();
        }

        match &payload.spills {
            Some(spill_data) => {
                marks.push(SectionMark::new(spills::TITLE, ctx.page_count()));
                let top = ctx.begin_content_page()?;
                spills::render(&mut ctx, spill_data, top)?;
                ctx.finish_content_page();
            }
            None => debug!("No spill records; skipping '{}'", spills::TITLE),
        }

        marks.push(SectionMark::new(CONTACT_SECTION, ctx.page_count()));
        outro::draw_outro(&mut ctx)?;

        Ok(marks)
    }
}

/// Normalises a raw JSON payload and renders it with the assets in `asset_dir`.
pub fn generate_report(payload: Value, asset_dir: &Path) -> Result<Vec<u8>, ReportError> {
    let payload = ReportPayload::from_value(payload)?;
    let report = ReportBuilder::new()
        .with_asset_dir(asset_dir)
        .render(&payload)?;
    Ok(report.bytes)
}
