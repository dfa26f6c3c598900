use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use dome_gallery::{
    ui::widget::{DomeGalleryWidget, TileClick},
    DomeGallery, DomeGalleryBuilder, GalleryConfig, ImageDescriptor, InteractionProfile,
};
use fxhash::FxHashMap;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];
const THUMBNAIL_SIZE: u32 = 512;

/// Command line: `dome-gallery-app [--config FILE] [DIR | IMAGE...]`
struct Args {
    config: Option<PathBuf>,
    inputs: Vec<PathBuf>,
}

impl Args {
    fn parse() -> anyhow::Result<Self> {
        let mut config = None;
        let mut inputs = Vec::new();
        let mut args = std::env::args().skip(1);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().context("--config needs a file")?;
                    config = Some(PathBuf::from(path));
                }
                "--help" | "-h" => {
                    println!("usage: dome-gallery-app [--config FILE] [DIR | IMAGE...]");
                    std::process::exit(0);
                }
                flag if flag.starts_with('-') => bail!("unknown option {}", flag),
                _ => inputs.push(PathBuf::from(&arg)),
            }
        }

        Ok(Self { config, inputs })
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expands directories into their image files, sorted by name
fn collect_images(inputs: &[PathBuf]) -> anyhow::Result<Vec<ImageDescriptor>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(input)
                .with_context(|| format!("reading {}", input.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| is_image(path))
                .collect();
            entries.sort();
            paths.extend(entries);
        } else {
            paths.push(input.clone());
        }
    }

    Ok(paths
        .into_iter()
        .map(|path| {
            let alt = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().replace(['-', '_'], " "))
                .unwrap_or_default();
            ImageDescriptor::new(path.to_string_lossy(), alt)
        })
        .collect())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse()?;
    let config = match &args.config {
        Some(path) => GalleryConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GalleryConfig::default(),
    };
    let images = collect_images(&args.inputs)?;
    log::info!("Loaded {} images", images.len());

    let gallery = DomeGalleryBuilder::new()
        .with_images(images)
        .with_config(config)
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Dome Gallery"),
        ..Default::default()
    };

    eframe::run_native(
        "dome-gallery-app",
        options,
        Box::new(|cc| Box::new(DomeGalleryApp::new(cc, gallery))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}

/// The main application struct
struct DomeGalleryApp {
    gallery: DomeGallery,
    textures: FxHashMap<String, egui::TextureId>,
    // Textures are freed when their handle drops
    handles: Vec<egui::TextureHandle>,
    viewing: Option<TileClick>,
    reduced_motion: bool,
    segments: u32,
    show_info_panel: bool,
}

impl DomeGalleryApp {
    fn new(cc: &eframe::CreationContext<'_>, gallery: DomeGallery) -> Self {
        let mut textures = FxHashMap::default();
        let mut handles = Vec::new();

        for image in gallery.images() {
            match load_thumbnail(&image.src) {
                Ok(color_image) => {
                    let handle = cc.egui_ctx.load_texture(
                        image.src.clone(),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    textures.insert(image.src.clone(), handle.id());
                    handles.push(handle);
                }
                Err(e) => log::warn!("Skipping texture for {}: {:#}", image.src, e),
            }
        }

        let segments = gallery.config().layout.segments;
        let reduced_motion = !gallery.config().inertia.enabled;

        Self {
            gallery,
            textures,
            handles,
            viewing: None,
            reduced_motion,
            segments,
            show_info_panel: true,
        }
    }

    fn apply_settings(&mut self) {
        let profile = if self.reduced_motion {
            InteractionProfile::ReducedMotion
        } else {
            InteractionProfile::Standard
        };
        let mut config = profile.resolve();
        config.layout.segments = self.segments;
        config.style = self.gallery.config().style.clone();

        if let Err(e) = self.gallery.set_config(config) {
            log::warn!("Rejected settings: {}", e);
        }
    }

    fn info_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Sphere");
        ui.separator();

        let rotation = self.gallery.rotation();
        ui.label(format!("Yaw: {:.1}°", rotation.yaw));
        ui.label(format!("Pitch: {:.1}°", rotation.pitch));
        ui.label(format!("State: {:?}", self.gallery.state()));
        ui.label(format!("Radius: {:.0}px", self.gallery.radius()));
        ui.label(format!("Tiles: {}", self.gallery.tiles().len()));
        ui.label(format!("Textures: {}", self.handles.len()));

        ui.separator();
        ui.heading("Settings");

        let mut changed = ui
            .checkbox(&mut self.reduced_motion, "Reduced motion")
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut self.segments, 8..=50).text("Segments"))
            .changed();
        if changed {
            self.apply_settings();
        }

        if ui.button("Reset rotation").clicked() {
            self.gallery.set_rotation(Default::default());
        }
    }

    fn viewer(&mut self, ctx: &egui::Context) {
        let Some(click) = &self.viewing else {
            return;
        };

        let mut open = true;
        egui::Window::new(if click.alt.is_empty() { &click.src } else { &click.alt })
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_size([640.0, 480.0])
            .show(ctx, |ui| match self.textures.get(&click.src) {
                Some(texture) => {
                    let size = ui.available_size();
                    ui.image((*texture, size));
                }
                None => {
                    ui.label(&click.src);
                }
            });

        if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.viewing = None;
        }
    }
}

impl eframe::App for DomeGalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_info_panel, "Info Panel");
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} images", self.gallery.images().len()));
                });
            });
        });

        if self.show_info_panel {
            egui::SidePanel::left("info_panel")
                .resizable(true)
                .show(ctx, |ui| self.info_panel(ui));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let response = DomeGalleryWidget::new(&mut self.gallery)
                    .textures(&self.textures)
                    .show(ui);
                if let Some(click) = response.clicked {
                    log::info!("Opening {}", click.src);
                    self.viewing = Some(click);
                }
            });

        for event in self.gallery.process_events() {
            log::trace!("{:?}", event);
        }

        self.viewer(ctx);
    }
}

fn load_thumbnail(path: &str) -> anyhow::Result<egui::ColorImage> {
    let image = image::open(path)
        .with_context(|| format!("decoding {}", path))?
        .thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE)
        .to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        image.as_raw(),
    ))
}
