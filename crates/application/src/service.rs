use std::path::{Path, PathBuf};

use editopia_domain::{
    DomainError, EditSession, ImageBuffer, SessionSummary, DEFAULT_HISTORY_CAPACITY,
};
use log::{debug, info, warn};

use crate::{
    AdjustExposureCommand, AdjustSaturationCommand, ApplicationError, ApplyFilterCommand,
    ExportCommand, ImageDecoder, ImageEncoder, LoadImageCommand, ResetCommand,
    SessionSummaryQuery, UndoCommand,
};

pub const EXPORT_PREFIX: &str = "edited_";

struct LoadedImage {
    source_path: PathBuf,
    session: EditSession,
}

pub struct ApplicationService {
    decoder: Box<dyn ImageDecoder>,
    encoder: Box<dyn ImageEncoder>,
    history_capacity: usize,
    loaded: Option<LoadedImage>,
}

impl ApplicationService {
    pub fn new(decoder: Box<dyn ImageDecoder>, encoder: Box<dyn ImageEncoder>) -> Self {
        Self::with_history_capacity(decoder, encoder, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_history_capacity(
        decoder: Box<dyn ImageDecoder>,
        encoder: Box<dyn ImageEncoder>,
        history_capacity: usize,
    ) -> Self {
        Self {
            decoder,
            encoder,
            history_capacity,
            loaded: None,
        }
    }

    pub fn load_image(
        &mut self,
        command: LoadImageCommand,
    ) -> Result<SessionSummary, ApplicationError> {
        if command.path.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "image path must not be empty".to_string(),
            ));
        }

        let image = self
            .decoder
            .decode(&command.path)
            .map_err(as_invalid_image)
            .inspect_err(|error| warn!("cannot load {}: {error}", command.path.display()))?;
        let summary = match self.loaded.as_mut() {
            Some(loaded) => {
                loaded.session.load(image)?;
                loaded.source_path = command.path.clone();
                loaded.session.summary()
            }
            None => {
                let session = EditSession::with_history_capacity(image, self.history_capacity)?;
                let summary = session.summary();
                self.loaded = Some(LoadedImage {
                    source_path: command.path.clone(),
                    session,
                });
                summary
            }
        };
        info!(
            "loaded {} ({}x{})",
            command.path.display(),
            summary.width,
            summary.height
        );
        Ok(summary)
    }

    pub fn apply_filter(
        &mut self,
        command: ApplyFilterCommand,
    ) -> Result<SessionSummary, ApplicationError> {
        let session = self.session_mut()?;
        session.apply_filter(command.kind);
        debug!("applied filter {}", command.kind);
        Ok(session.summary())
    }

    pub fn adjust_exposure(
        &mut self,
        command: AdjustExposureCommand,
    ) -> Result<SessionSummary, ApplicationError> {
        let session = self.session_mut()?;
        session.adjust_exposure(command.factor).inspect_err(|error| {
            warn!("exposure rejected: {error}");
        })?;
        debug!("exposure set to {:.2}", command.factor);
        Ok(session.summary())
    }

    pub fn adjust_saturation(
        &mut self,
        command: AdjustSaturationCommand,
    ) -> Result<SessionSummary, ApplicationError> {
        let session = self.session_mut()?;
        session.adjust_saturation(command.factor).inspect_err(|error| {
            warn!("saturation rejected: {error}");
        })?;
        debug!("saturation set to {:.2}", command.factor);
        Ok(session.summary())
    }

    pub fn undo(&mut self, _command: UndoCommand) -> Result<SessionSummary, ApplicationError> {
        let session = self.session_mut()?;
        if !session.undo() {
            debug!("undo requested with empty history");
        }
        Ok(session.summary())
    }

    pub fn reset(&mut self, _command: ResetCommand) -> Result<SessionSummary, ApplicationError> {
        let session = self.session_mut()?;
        session.reset();
        debug!("session reset");
        Ok(session.summary())
    }

    /// Writes the edited image into `output_dir` as `edited_<file name>`.
    /// A failed write leaves the session untouched.
    pub fn export(&self, command: ExportCommand) -> Result<PathBuf, ApplicationError> {
        let loaded = self.loaded.as_ref().ok_or(ApplicationError::NoImageLoaded)?;
        let output_path = command
            .output_dir
            .join(export_file_name(&loaded.source_path)?);
        self.encoder
            .encode(loaded.session.edited(), &output_path)
            .inspect_err(|error| warn!("export to {} failed: {error}", output_path.display()))?;
        info!("exported {}", output_path.display());
        Ok(output_path)
    }

    pub fn session_summary(
        &self,
        _query: SessionSummaryQuery,
    ) -> Result<SessionSummary, ApplicationError> {
        Ok(self.session()?.summary())
    }

    pub fn edited_image(&self) -> Option<&ImageBuffer> {
        self.loaded.as_ref().map(|loaded| loaded.session.edited())
    }

    pub fn original_image(&self) -> Option<&ImageBuffer> {
        self.loaded.as_ref().map(|loaded| loaded.session.original())
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.loaded.as_ref().map(|loaded| loaded.source_path.as_path())
    }

    fn session(&self) -> Result<&EditSession, ApplicationError> {
        self.loaded
            .as_ref()
            .map(|loaded| &loaded.session)
            .ok_or(ApplicationError::NoImageLoaded)
    }

    fn session_mut(&mut self) -> Result<&mut EditSession, ApplicationError> {
        self.loaded
            .as_mut()
            .map(|loaded| &mut loaded.session)
            .ok_or(ApplicationError::NoImageLoaded)
    }
}

/// Any decoder failure means the input cannot be edited.
fn as_invalid_image(error: ApplicationError) -> ApplicationError {
    match error {
        ApplicationError::Domain(error) => ApplicationError::Domain(error),
        other => ApplicationError::Domain(DomainError::undecodable(other)),
    }
}

pub fn export_file_name(source_path: &Path) -> Result<PathBuf, ApplicationError> {
    let file_name = source_path.file_name().ok_or_else(|| {
        ApplicationError::InvalidInput(format!(
            "source path has no file name: {}",
            source_path.display()
        ))
    })?;
    let mut name = std::ffi::OsString::from(EXPORT_PREFIX);
    name.push(file_name);
    Ok(PathBuf::from(name))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use editopia_domain::{filters, EditParams, FilterKind, InvalidImageReason, Rgb};

    use super::*;

    struct FakeDecoder {
        images: HashMap<PathBuf, ImageBuffer>,
    }

    impl FakeDecoder {
        fn with(entries: &[(&str, ImageBuffer)]) -> Self {
            Self {
                images: entries
                    .iter()
                    .map(|(path, image)| (PathBuf::from(path), image.clone()))
                    .collect(),
            }
        }
    }

    impl ImageDecoder for FakeDecoder {
        fn decode(&self, path: &Path) -> Result<ImageBuffer, ApplicationError> {
            self.images
                .get(path)
                .cloned()
                .ok_or_else(|| ApplicationError::InvalidInput(format!("no such file {path:?}")))
        }
    }

    #[derive(Default)]
    struct FakeEncoder {
        written: Rc<RefCell<Vec<(PathBuf, ImageBuffer)>>>,
        fail: bool,
    }

    impl ImageEncoder for FakeEncoder {
        fn encode(&self, image: &ImageBuffer, path: &Path) -> Result<(), ApplicationError> {
            if self.fail {
                return Err(ApplicationError::EncodeWrite("disk full".to_string()));
            }
            self.written
                .borrow_mut()
                .push((path.to_path_buf(), image.clone()));
            Ok(())
        }
    }

    fn scenario_image() -> ImageBuffer {
        ImageBuffer::from_pixels(
            2,
            2,
            vec![
                Rgb::new(255, 0, 0),
                Rgb::new(0, 255, 0),
                Rgb::new(0, 0, 255),
                Rgb::new(255, 255, 255),
            ],
        )
        .expect("2x2 image")
    }

    fn service_with(
        written: Rc<RefCell<Vec<(PathBuf, ImageBuffer)>>>,
        fail: bool,
    ) -> ApplicationService {
        ApplicationService::new(
            Box::new(FakeDecoder::with(&[
                ("/photos/beach.png", scenario_image()),
                ("/photos/empty.png", ImageBuffer::from_pixel(0, 4, Rgb::gray(0))),
                ("/photos/night.png", ImageBuffer::from_pixel(3, 1, Rgb::gray(20))),
            ])),
            Box::new(FakeEncoder { written, fail }),
        )
    }

    fn load(service: &mut ApplicationService) -> SessionSummary {
        service
            .load_image(LoadImageCommand {
                path: PathBuf::from("/photos/beach.png"),
            })
            .expect("load should work")
    }

    #[test]
    fn operations_before_load_report_no_image() {
        let mut service = service_with(Rc::default(), false);

        assert!(matches!(
            service.apply_filter(ApplyFilterCommand {
                kind: FilterKind::Warm
            }),
            Err(ApplicationError::NoImageLoaded)
        ));
        assert!(matches!(
            service.adjust_exposure(AdjustExposureCommand { factor: 2.0 }),
            Err(ApplicationError::NoImageLoaded)
        ));
        assert!(matches!(
            service.undo(UndoCommand),
            Err(ApplicationError::NoImageLoaded)
        ));
        assert!(matches!(
            service.export(ExportCommand {
                output_dir: PathBuf::from("out")
            }),
            Err(ApplicationError::NoImageLoaded)
        ));
        assert!(service.edited_image().is_none());
    }

    #[test]
    fn load_then_apply_sepia_workflow() {
        let mut service = service_with(Rc::default(), false);
        let summary = load(&mut service);
        assert_eq!((summary.width, summary.height), (2, 2));
        assert_eq!(summary.params, EditParams::default());

        let summary = service
            .apply_filter(ApplyFilterCommand {
                kind: FilterKind::Sepia,
            })
            .expect("filter should work");
        assert_eq!(summary.params.filter, FilterKind::Sepia);
        assert_eq!(summary.history_len, 1);

        let edited = service.edited_image().expect("edited");
        assert_eq!(edited.get_pixel(0, 0), Some(Rgb::new(100, 88, 69)));
        assert_eq!(service.original_image(), Some(&scenario_image()));
    }

    #[test]
    fn loading_another_image_starts_a_clean_session() {
        let mut service = service_with(Rc::default(), false);
        load(&mut service);
        service
            .apply_filter(ApplyFilterCommand {
                kind: FilterKind::Vintage,
            })
            .expect("filter");
        service
            .adjust_saturation(AdjustSaturationCommand { factor: 0.5 })
            .expect("saturation");

        let summary = service
            .load_image(LoadImageCommand {
                path: PathBuf::from("/photos/night.png"),
            })
            .expect("reload");
        assert_eq!((summary.width, summary.height), (3, 1));
        assert_eq!(summary.history_len, 0);
        assert_eq!(summary.params, EditParams::default());
        assert_eq!(service.source_path(), Some(Path::new("/photos/night.png")));
        assert_eq!(
            service.edited_image(),
            Some(&ImageBuffer::from_pixel(3, 1, Rgb::gray(20)))
        );
    }

    #[test]
    fn failed_load_keeps_previous_session() {
        let mut service = service_with(Rc::default(), false);
        load(&mut service);
        service
            .apply_filter(ApplyFilterCommand {
                kind: FilterKind::Cool,
            })
            .expect("filter");

        let missing = service.load_image(LoadImageCommand {
            path: PathBuf::from("/photos/missing.png"),
        });
        assert!(matches!(
            missing,
            Err(ApplicationError::Domain(DomainError::InvalidImage {
                reason: InvalidImageReason::Undecodable(_)
            }))
        ));

        let empty = service.load_image(LoadImageCommand {
            path: PathBuf::from("/photos/empty.png"),
        });
        assert!(matches!(
            empty,
            Err(ApplicationError::Domain(DomainError::InvalidImage {
                reason: InvalidImageReason::ZeroDimensions { .. }
            }))
        ));

        assert_eq!(
            service.edited_image(),
            Some(&filters::cool(&scenario_image()))
        );
        assert_eq!(
            service.source_path(),
            Some(Path::new("/photos/beach.png"))
        );
    }

    #[test]
    fn out_of_range_exposure_keeps_edited() {
        let mut service = service_with(Rc::default(), false);
        load(&mut service);
        service
            .adjust_saturation(AdjustSaturationCommand { factor: 0.5 })
            .expect("saturation");
        let before = service.edited_image().cloned();

        let result = service.adjust_exposure(AdjustExposureCommand { factor: 0.05 });
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::OutOfRange { .. }))
        ));
        assert_eq!(service.edited_image().cloned(), before);
    }

    #[test]
    fn load_then_export_hands_over_identical_pixels() {
        let written = Rc::new(RefCell::new(Vec::new()));
        let mut service = service_with(Rc::clone(&written), false);
        load(&mut service);

        let path = service
            .export(ExportCommand {
                output_dir: PathBuf::from("out"),
            })
            .expect("export should work");
        assert_eq!(path, PathBuf::from("out/edited_beach.png"));

        let written = written.borrow();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, path);
        assert_eq!(written[0].1, scenario_image());
    }

    #[test]
    fn failed_export_leaves_state_alone() {
        let mut service = service_with(Rc::default(), true);
        load(&mut service);
        service
            .apply_filter(ApplyFilterCommand {
                kind: FilterKind::Warm,
            })
            .expect("filter");
        let before = service.session_summary(SessionSummaryQuery).expect("summary");

        let result = service.export(ExportCommand {
            output_dir: PathBuf::from("out"),
        });
        assert!(matches!(result, Err(ApplicationError::EncodeWrite(_))));
        assert_eq!(
            service.session_summary(SessionSummaryQuery).expect("summary"),
            before
        );
        assert_eq!(
            service.edited_image(),
            Some(&filters::warm(&scenario_image()))
        );
    }

    #[test]
    fn undo_and_reset_flow_through_the_session() {
        let mut service = service_with(Rc::default(), false);
        load(&mut service);
        service
            .apply_filter(ApplyFilterCommand {
                kind: FilterKind::BlackAndWhite,
            })
            .expect("filter");
        service
            .adjust_exposure(AdjustExposureCommand { factor: 2.0 })
            .expect("exposure");

        let summary = service.undo(UndoCommand).expect("undo");
        assert_eq!(summary.history_len, 0);
        assert_eq!(service.edited_image(), Some(&scenario_image()));

        let summary = service.undo(UndoCommand).expect("second undo is a no-op");
        assert_eq!(summary.history_len, 0);

        service
            .apply_filter(ApplyFilterCommand {
                kind: FilterKind::Vintage,
            })
            .expect("filter");
        let summary = service.reset(ResetCommand).expect("reset");
        assert_eq!(summary.params, EditParams::default());
        assert_eq!(summary.history_len, 1);
        assert_eq!(service.edited_image(), Some(&scenario_image()));
    }

    #[test]
    fn export_name_uses_fixed_prefix() {
        assert_eq!(
            export_file_name(Path::new("/a/b/photo.jpg")).expect("name"),
            PathBuf::from("edited_photo.jpg")
        );
        assert!(matches!(
            export_file_name(Path::new("/")),
            Err(ApplicationError::InvalidInput(_))
        ));
    }

    #[test]
    fn custom_history_capacity_is_respected() {
        let mut service = ApplicationService::with_history_capacity(
            Box::new(FakeDecoder::with(&[("/p.png", scenario_image())])),
            Box::<FakeEncoder>::default(),
            2,
        );
        service
            .load_image(LoadImageCommand {
                path: PathBuf::from("/p.png"),
            })
            .expect("load");
        for kind in [FilterKind::Warm, FilterKind::Cool, FilterKind::Sepia] {
            service
                .apply_filter(ApplyFilterCommand { kind })
                .expect("filter");
        }
        let summary = service.session_summary(SessionSummaryQuery).expect("summary");
        assert_eq!(summary.history_len, 2);
        assert_eq!(summary.history_capacity, 2);
    }
}
