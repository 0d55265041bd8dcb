// Sheet sources: sliced image sheets and directories of pre-split frames

use super::{Frame, FrameRegion, GridSlicer, SheetError, SheetSource};
use crate::core::sort_by_frame_number;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// File extensions accepted as frame images
pub const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

fn has_frame_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_ascii_lowercase();
            FRAME_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn image_size(path: &Path) -> Result<(u32, u32), SheetError> {
    image::image_dimensions(path).map_err(|source| SheetError::Image {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

/// A single image sliced into fixed-size cells
///
/// Frames are named `<file stem>_<n>` in row-major order from the top-left.
pub struct ImageSheetSource {
    path: PathBuf,
    name: String,
    cell_width: u32,
    cell_height: u32,
}

impl ImageSheetSource {
    /// Create a new image sheet source
    pub fn new<P: AsRef<Path>>(path: P, cell_width: u32, cell_height: u32) -> Result<Self, SheetError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(SheetError::InvalidCellSize {
                width: cell_width,
                height: cell_height,
            });
        }

        let path = path.as_ref().to_path_buf();
        Ok(Self {
            name: file_stem(&path),
            path,
            cell_width,
            cell_height,
        })
    }

    /// Get the image path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for ImageSheetSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_frames(&self) -> Result<Vec<Frame>, SheetError> {
        if !self.path.is_file() {
            return Err(SheetError::NotFound(self.path.to_string_lossy().to_string()));
        }

        let (width, height) = image_size(&self.path)?;
        let slicer = GridSlicer::new(width, height, self.cell_width, self.cell_height);

        let (extra_x, extra_y) = slicer.leftover();
        if extra_x > 0 || extra_y > 0 {
            warn!(
                "{}: {}x{} is not a multiple of {}x{}, ignoring {}px on the right and {}px at the bottom",
                self.name, width, height, self.cell_width, self.cell_height, extra_x, extra_y
            );
        }

        let mut frames: Vec<Frame> = slicer
            .regions()
            .into_iter()
            .enumerate()
            .map(|(i, region)| Frame::new(format!("{}_{}", self.name, i), region))
            .collect();
        sort_by_frame_number(&mut frames, |f| f.name.as_str());

        debug!(
            "{}: sliced {} frames ({} columns x {} rows)",
            self.name,
            frames.len(),
            slicer.columns(),
            slicer.rows()
        );

        Ok(frames)
    }
}

/// A directory where every image file is one frame
pub struct DirectorySheetSource {
    path: PathBuf,
    name: String,
}

impl DirectorySheetSource {
    /// Create a new directory source
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.to_string_lossy().to_string()),
            path,
        }
    }

    /// Get the directory path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for DirectorySheetSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_frames(&self) -> Result<Vec<Frame>, SheetError> {
        if !self.path.is_dir() {
            return Err(SheetError::NotFound(self.path.to_string_lossy().to_string()));
        }

        let mut frames = Vec::new();

        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && has_frame_extension(&path) {
                let (width, height) = image_size(&path)?;
                frames.push(Frame::new(file_stem(&path), FrameRegion::whole(width, height)));
            }
        }

        sort_by_frame_number(&mut frames, |f| f.name.as_str());
        debug!("{}: found {} frame files", self.name, frames.len());

        Ok(frames)
    }
}

/// Open a sheet: directories list their frame files, images are sliced by `cell`
pub fn open_sheet<P: AsRef<Path>>(
    path: P,
    cell: Option<(u32, u32)>,
) -> Result<Box<dyn SheetSource>, SheetError> {
    let path = path.as_ref();

    if path.is_dir() {
        return Ok(Box::new(DirectorySheetSource::new(path)));
    }
    if !path.exists() {
        return Err(SheetError::NotFound(path.to_string_lossy().to_string()));
    }

    let (cell_width, cell_height) = cell.unwrap_or((0, 0));
    Ok(Box::new(ImageSheetSource::new(path, cell_width, cell_height)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbaImage::new(width, height).save(path).unwrap();
    }

    #[test]
    fn test_frame_extensions() {
        assert!(has_frame_extension(Path::new("a/walk_1.png")));
        assert!(has_frame_extension(Path::new("walk_1.JPG")));
        assert!(!has_frame_extension(Path::new("walk_1.wav")));
        assert!(!has_frame_extension(Path::new("walk_1")));
    }

    #[test]
    fn test_image_source_invalid_cell() {
        let result = ImageSheetSource::new("hero.png", 0, 32);
        assert!(matches!(
            result,
            Err(SheetError::InvalidCellSize { width: 0, height: 32 })
        ));
    }

    #[test]
    fn test_image_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = ImageSheetSource::new(dir.path().join("missing.png"), 16, 16).unwrap();

        assert!(matches!(source.list_frames(), Err(SheetError::NotFound(_))));
    }

    #[test]
    fn test_image_source_slices_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hero.png");
        write_png(&path, 64, 48);

        let source = ImageSheetSource::new(&path, 16, 16).unwrap();
        assert_eq!(source.name(), "hero");

        let frames = source.list_frames().unwrap();
        assert_eq!(frames.len(), 12);
        assert_eq!(frames[0].name, "hero_0");
        assert_eq!(frames[11].name, "hero_11");

        // hero_10 must follow hero_9, not hero_1
        assert_eq!(frames[10].name, "hero_10");
        assert_eq!((frames[4].region.x, frames[4].region.y), (0, 16));
    }

    #[test]
    fn test_image_source_ignores_leftover() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.png");
        write_png(&path, 40, 20);

        let source = ImageSheetSource::new(&path, 16, 16).unwrap();
        assert_eq!(source.list_frames().unwrap().len(), 2);
    }

    #[test]
    fn test_directory_source_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["walk_10.png", "walk_2.png", "walk_1.png"] {
            write_png(&dir.path().join(name), 8, 8);
        }
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

        let source = DirectorySheetSource::new(dir.path());
        let names: Vec<String> = source
            .list_frames()
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();

        assert_eq!(names, vec!["walk_1", "walk_2", "walk_10"]);
    }

    #[test]
    fn test_directory_source_missing() {
        let source = DirectorySheetSource::new("/definitely/not/here");
        assert!(matches!(source.list_frames(), Err(SheetError::NotFound(_))));
    }

    #[test]
    fn test_open_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.png");
        write_png(&path, 32, 16);

        let sheet = open_sheet(&path, Some((16, 16))).unwrap();
        assert_eq!(sheet.name(), "body");
        assert_eq!(sheet.list_frames().unwrap().len(), 2);

        let frames_dir = open_sheet(dir.path(), None).unwrap();
        assert_eq!(frames_dir.list_frames().unwrap().len(), 1);

        // Image sheets need a cell size
        assert!(matches!(
            open_sheet(&path, None),
            Err(SheetError::InvalidCellSize { .. })
        ));
        assert!(matches!(
            open_sheet(dir.path().join("nope.png"), Some((16, 16))),
            Err(SheetError::NotFound(_))
        ));
    }
}
