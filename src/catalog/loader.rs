use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::catalog::builtin::BRIGHT_STARS;
use crate::catalog::error::CatalogError;
use crate::ephemeris::{Body, CatalogStar};

pub struct StarCatalog {
    stars: HashMap<u32, CatalogStar>,
}

impl StarCatalog {
    pub fn empty() -> Self {
        Self {
            stars: HashMap::new(),
        }
    }

    /// Catalog holding the bright stars compiled into the binary.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for (hip, name, ra_deg, dec_deg, pm_ra_mas_yr, pm_dec_mas_yr) in BRIGHT_STARS {
            catalog.insert(CatalogStar {
                hip,
                name: name.to_string(),
                ra_deg,
                dec_deg,
                pm_ra_mas_yr,
                pm_dec_mas_yr,
                epoch: 2000.0,
            });
        }
        catalog
    }

    pub fn insert(&mut self, star: CatalogStar) {
        self.stars.insert(star.hip, star);
    }

    /// Load every `.yaml`/`.yml` file of a directory. Files that fail to
    /// parse are skipped. Returns the number of stars added or replaced.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, CatalogError> {
        if !dir.exists() {
            return Err(CatalogError::DirectoryNotFound(dir.display().to_string()));
        }

        let mut loaded = 0;
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let is_yaml = path
                .extension()
                .map(|ext| ext == "yaml" || ext == "yml")
                .unwrap_or(false);
            if !is_yaml {
                continue;
            }

            match self.load_file(&path) {
                Ok(count) => loaded += count,
                Err(e) => {
                    log::warn!("Failed to load star catalog {}: {}", path.display(), e);
                }
            }
        }

        Ok(loaded)
    }

    /// Load a YAML list of stars. Nothing is added if any entry is invalid.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, CatalogError> {
        let content = fs::read_to_string(path)?;
        let file = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let stars = parse_catalog(&content, &file)?;
        let count = stars.len();
        for star in stars {
            self.insert(star);
        }
        log::debug!("loaded {} stars from {}", count, file);
        Ok(count)
    }

    /// Find a star by `HIP <n>`, a bare Hipparcos number or its name.
    /// A name shared by several stars picks the lowest Hipparcos number.
    pub fn lookup(&self, query: &str) -> Option<&CatalogStar> {
        let query = query.trim();
        let number = query
            .strip_prefix("HIP")
            .or_else(|| query.strip_prefix("hip"))
            .unwrap_or(query)
            .trim();

        if let Ok(hip) = number.parse::<u32>() {
            return self.stars.get(&hip);
        }

        self.stars
            .values()
            .filter(|s| s.name.eq_ignore_ascii_case(query))
            .min_by_key(|s| s.hip)
    }

    /// Turn a configured body name into something observable.
    pub fn resolve_body(&self, name: &str) -> Result<Body, CatalogError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sun" => Ok(Body::Sun),
            "moon" => Ok(Body::Moon),
            _ => self
                .lookup(name)
                .cloned()
                .map(Body::Star)
                .ok_or_else(|| CatalogError::UnknownBody(name.to_string())),
        }
    }

    /// Stars ordered by Hipparcos number.
    pub fn stars(&self) -> Vec<&CatalogStar> {
        let mut stars: Vec<_> = self.stars.values().collect();
        stars.sort_by_key(|s| s.hip);
        stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

fn parse_catalog(content: &str, file: &str) -> Result<Vec<CatalogStar>, CatalogError> {
    let invalid = |message: String| CatalogError::InvalidCatalog {
        file: file.to_string(),
        message,
    };

    let stars: Vec<CatalogStar> =
        serde_yaml::from_str(content).map_err(|e| invalid(e.to_string()))?;

    for star in &stars {
        if !(0.0..360.0).contains(&star.ra_deg) {
            return Err(invalid(format!(
                "HIP {}: right ascension {} outside [0, 360)",
                star.hip, star.ra_deg
            )));
        }
        if !(-90.0..=90.0).contains(&star.dec_deg) {
            return Err(invalid(format!(
                "HIP {}: declination {} outside [-90, 90]",
                star.hip, star.dec_deg
            )));
        }
    }

    Ok(stars)
}
