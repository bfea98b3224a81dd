//! Pool of face images: loading from disk, shuffling, and handing textures out face by face.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageReader;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::Placeholders;
use crate::geometry::{Face, Texture};
use crate::utils::constants::{cube_constants::FACE_COUNT, game_constants::TEXTURE_EXTENSIONS};

/// Every texture ever loaded plus the shuffled subset still waiting for a face.
#[derive(Clone, Debug)]
pub struct TexturePool {
    all: Vec<Texture>,
    available: Vec<Texture>,
    placeholders: Placeholders,
}

impl TexturePool {
    /// Creates an empty pool.
    pub fn new(placeholders: Placeholders) -> Self {
        Self {
            all: Vec::new(),
            available: Vec::new(),
            placeholders,
        }
    }

    /// Creates a pool whose available list is `textures`, unshuffled.
    /// The last texture is the first one handed out.
    pub fn with_available(placeholders: Placeholders, textures: Vec<Texture>) -> Self {
        Self {
            all: textures.clone(),
            available: textures,
            placeholders,
        }
    }

    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    /// Number of textures not yet shown on a face.
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Number of textures loaded so far.
    pub fn total_count(&self) -> usize {
        self.all.len()
    }

    /// Scans `dir` (non-recursive) and appends every decodable image to the pool.
    ///
    /// Returns `true` when at least one image was loaded, in which case the available
    /// list is rebuilt. A missing or unreadable directory only gets logged.
    pub fn load_from_directory<R: Rng + ?Sized>(&mut self, dir: &Path, rng: &mut R) -> bool {
        log::info!("Attempting to auto-load textures from '{}'", dir.display());

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Directory '{}' not found, skipping auto-load", dir.display());
                return false;
            }
            Err(err) => {
                log::warn!("Could not read directory '{}': {err}", dir.display());
                return false;
            }
        };

        // read_dir order is platform dependent
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_texture_extension(path))
            .collect();
        paths.sort();

        let decoded = decode_files(&paths);
        if decoded.is_empty() {
            log::info!("No valid images found in '{}'", dir.display());
            return false;
        }

        self.all.extend(decoded);
        self.prepare_available(rng);
        true
    }

    /// Makes `textures` the whole pool and rebuilds the available list.
    ///
    /// An empty list still clears the pool, so the next deal shows the "empty"
    /// placeholder. Returns whether anything was loaded.
    pub fn replace_all<R: Rng + ?Sized>(&mut self, textures: Vec<Texture>, rng: &mut R) -> bool {
        self.all = textures;
        if self.all.is_empty() {
            self.available.clear();
            log::info!("None of the selected files could be loaded, texture pool cleared");
            return false;
        }
        self.prepare_available(rng);
        true
    }

    fn prepare_available<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.available = self.all.clone();
        self.available.shuffle(rng);
        log::info!(
            "Loaded {} textures, available pool created and shuffled",
            self.available.len()
        );
    }

    /// Puts a fresh texture on every face, falling back to placeholders.
    ///
    /// With an empty pool all faces show the "empty" image and turn grey. Otherwise faces
    /// are filled in order from the end of the available list and the ones left over
    /// show the "grey" image.
    pub fn assign_initial_textures(
        &mut self,
        faces: &mut [Face; FACE_COUNT],
        is_grey: &mut [bool; FACE_COUNT],
    ) {
        if self.available.is_empty() {
            log::info!("No available textures to set on start");
            for (face, grey) in faces.iter_mut().zip(is_grey.iter_mut()) {
                face.texture = self.placeholders.empty.clone();
                *grey = true;
            }
            return;
        }

        for (i, (face, grey)) in faces.iter_mut().zip(is_grey.iter_mut()).enumerate() {
            match self.available.pop() {
                Some(texture) => {
                    face.texture = texture;
                    *grey = false;
                }
                None => {
                    face.texture = self.placeholders.grey.clone();
                    *grey = true;
                    log::debug!("Available textures ran out, face {i} is set to grey");
                }
            }
        }
        log::info!(
            "Set initial textures, {} remaining available",
            self.available.len()
        );
    }

    /// Swaps the texture of face `index` for the next available one.
    ///
    /// Out of range indices are ignored. With nothing left the face turns grey but keeps
    /// showing its previous image.
    pub fn replace_face_texture(
        &mut self,
        index: usize,
        faces: &mut [Face; FACE_COUNT],
        is_grey: &mut [bool; FACE_COUNT],
    ) {
        if index >= FACE_COUNT {
            return;
        }
        match self.available.pop() {
            Some(texture) => {
                faces[index].texture = texture;
                is_grey[index] = false;
            }
            None => is_grey[index] = true,
        }
    }
}

/// Whether `path` ends in one of the accepted image extensions (case-insensitive).
pub fn has_texture_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            TEXTURE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Decodes a single image file into an RGBA texture.
pub fn load_texture_from_file(path: &Path) -> Result<Texture, image::ImageError> {
    // Sniff the content so misnamed or upper-case extensions still decode
    let image = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?
        .into_rgba8();
    Ok(Arc::new(image))
}

/// Decodes every path, logging and skipping the ones that fail.
pub fn decode_files(paths: &[PathBuf]) -> Vec<Texture> {
    paths
        .iter()
        .filter_map(|path| match load_texture_from_file(path) {
            Ok(texture) => {
                log::debug!("Loaded texture from '{}'", path.display());
                Some(texture)
            }
            Err(err) => {
                log::warn!("Error loading image '{}': {err}", path.display());
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RollerConfig;
    use crate::geometry::Cube;
    use image::{ImageFormat, Rgba, RgbaImage};
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    fn solid(value: u8) -> Texture {
        Arc::new(RgbaImage::from_pixel(2, 2, Rgba([value, value, value, 255])))
    }

    fn fresh_cube(pool: &TexturePool) -> Cube {
        Cube::new(150.0, pool.placeholders().empty.clone())
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "cube_dice_roller_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Faces are filled from the back of the available list.
    #[test]
    fn initial_assignment_pops_from_the_end() {
        let textures: Vec<Texture> = (0..8).map(|i| solid(i * 10)).collect();
        let mut pool =
            TexturePool::with_available(RollerConfig::default().placeholders(), textures.clone());
        let mut cube = fresh_cube(&pool);
        let mut grey = [true; FACE_COUNT];

        pool.assign_initial_textures(&mut cube.faces, &mut grey);

        assert_eq!(grey, [false; FACE_COUNT]);
        for i in 0..FACE_COUNT {
            assert!(Arc::ptr_eq(&cube.faces[i].texture, &textures[7 - i]), "face {i}");
        }
        assert_eq!(pool.available_count(), 2);
    }

    /// Faces beyond the pool size get the grey placeholder.
    #[test]
    fn initial_assignment_grey_fallback() {
        let mut pool = TexturePool::with_available(
            RollerConfig::default().placeholders(),
            vec![solid(1), solid(2)],
        );
        let mut cube = fresh_cube(&pool);
        let mut grey = [false; FACE_COUNT];

        pool.assign_initial_textures(&mut cube.faces, &mut grey);

        assert_eq!(grey, [false, false, true, true, true, true]);
        let grey_image = &pool.placeholders().grey;
        assert!(cube.faces[2..].iter().all(|f| Arc::ptr_eq(&f.texture, grey_image)));
        assert_eq!(pool.available_count(), 0);
    }

    /// An empty pool shows the "empty" image everywhere.
    #[test]
    fn initial_assignment_empty_pool() {
        let mut pool = TexturePool::new(RollerConfig::default().placeholders());
        let mut cube = Cube::new(150.0, solid(9));
        let mut grey = [false; FACE_COUNT];

        pool.assign_initial_textures(&mut cube.faces, &mut grey);

        assert_eq!(grey, [true; FACE_COUNT]);
        let empty = &pool.placeholders().empty;
        assert!(cube.faces.iter().all(|f| Arc::ptr_eq(&f.texture, empty)));
    }

    #[test]
    fn replace_face_texture_behaviour() {
        let next = solid(200);
        let mut pool =
            TexturePool::with_available(RollerConfig::default().placeholders(), vec![next.clone()]);
        let mut cube = Cube::new(150.0, solid(5));
        let mut grey = [true; FACE_COUNT];

        // out of range is a no-op
        pool.replace_face_texture(FACE_COUNT, &mut cube.faces, &mut grey);
        assert_eq!(pool.available_count(), 1);

        pool.replace_face_texture(3, &mut cube.faces, &mut grey);
        assert!(!grey[3]);
        assert!(Arc::ptr_eq(&cube.faces[3].texture, &next));

        // pool exhausted: the face turns grey but keeps its image
        pool.replace_face_texture(3, &mut cube.faces, &mut grey);
        assert!(grey[3]);
        assert!(Arc::ptr_eq(&cube.faces[3].texture, &next));
    }

    /// Only image extensions are considered, undecodable files are skipped.
    #[test]
    fn directory_loading_filters_extensions() {
        let dir = scratch_dir("filters");
        RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]))
            .save_with_format(dir.join("red.png"), ImageFormat::Png)
            .unwrap();
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]))
            .save_with_format(dir.join("blue.PNG"), ImageFormat::Png)
            .unwrap();
        fs::write(dir.join("notes.txt"), "not an image").unwrap();
        fs::write(dir.join("broken.jpg"), [0u8, 1, 2, 3]).unwrap();

        let mut pool = TexturePool::new(RollerConfig::default().placeholders());
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(pool.load_from_directory(&dir, &mut rng));
        assert_eq!(pool.total_count(), 2);
        assert_eq!(pool.available_count(), 2);

        // a second scan appends
        assert!(pool.load_from_directory(&dir, &mut rng));
        assert_eq!(pool.total_count(), 4);
        assert_eq!(pool.available_count(), 4);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn directory_loading_tolerates_missing_dir() {
        let mut pool = TexturePool::new(RollerConfig::default().placeholders());
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(!pool.load_from_directory(Path::new("no/such/texture/dir"), &mut rng));
        assert_eq!(pool.total_count(), 0);
    }

    /// Picked files that all fail to decode leave an empty pool behind.
    #[test]
    fn replace_all_clears_pool_when_nothing_decodes() {
        let mut pool = TexturePool::with_available(
            RollerConfig::default().placeholders(),
            vec![solid(1), solid(2), solid(3)],
        );
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let decoded = decode_files(&[PathBuf::from("missing.png")]);
        assert!(!pool.replace_all(decoded, &mut rng));
        assert_eq!(pool.total_count(), 0);
        assert_eq!(pool.available_count(), 0);

        let mut cube = fresh_cube(&pool);
        let mut grey = [false; FACE_COUNT];
        pool.assign_initial_textures(&mut cube.faces, &mut grey);
        assert_eq!(grey, [true; FACE_COUNT]);

        assert!(pool.replace_all(vec![solid(7)], &mut rng));
        assert_eq!(pool.total_count(), 1);
        assert_eq!(pool.available_count(), 1);
    }

    #[test]
    fn extension_check() {
        assert!(has_texture_extension(Path::new("a/b/face.jpeg")));
        assert!(has_texture_extension(Path::new("face.JPG")));
        assert!(!has_texture_extension(Path::new("face.gif")));
        assert!(!has_texture_extension(Path::new("png")));
    }
}
