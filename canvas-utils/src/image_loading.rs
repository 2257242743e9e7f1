use std::path::{Path, PathBuf};

use canvas_utils_canvas2d::tiny_skia::{ColorU8, Pixmap};
use canvas_utils_canvas2d::{Canvas2dError, CanvasPixmapRef};
use log::{error, info};
use reqwest::{Client, StatusCode};

use crate::error::{CanvasUtilsError, CanvasUtilsResult};

static CANVAS_UTILS_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

lazy_static! {
    static ref REQWEST_CLIENT: Client = reqwest::ClientBuilder::new()
        .user_agent(CANVAS_UTILS_USER_AGENT)
        .build()
        .expect("Failed to construct reqwest client");
}

/// A decoded raster image, stored as premultiplied RGBA ready for drawing.
#[derive(Clone, Debug)]
pub struct ImageHandle {
    pixmap: Pixmap,
}

impl ImageHandle {
    /// Decode PNG, JPEG or GIF data.
    pub fn from_bytes(bytes: &[u8]) -> CanvasUtilsResult<Self> {
        let img = image::load_from_memory(bytes)?;
        Self::from_rgba_image(&img.to_rgba8())
    }

    /// Wrap straight-alpha RGBA pixels.
    pub fn from_rgba_image(img: &image::RgbaImage) -> CanvasUtilsResult<Self> {
        let (width, height) = img.dimensions();
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(Canvas2dError::InvalidDimensions { width, height })?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
            let [r, g, b, a] = src.0;
            *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Copy out as straight-alpha RGBA.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let c = self
                .pixmap
                .pixel(x, y)
                .map(|p| p.demultiply())
                .unwrap_or_else(|| ColorU8::from_rgba(0, 0, 0, 0));
            image::Rgba([c.red(), c.green(), c.blue(), c.alpha()])
        })
    }
}

impl From<Pixmap> for ImageHandle {
    fn from(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }
}

/// Anything that can be drawn as an image: decoded images, pixmaps and other canvases.
pub trait CanvasImageSource {
    fn pixels(&self) -> CanvasPixmapRef<'_>;

    fn natural_width(&self) -> u32 {
        self.pixels().width
    }

    fn natural_height(&self) -> u32 {
        self.pixels().height
    }
}

impl CanvasImageSource for ImageHandle {
    fn pixels(&self) -> CanvasPixmapRef<'_> {
        self.pixmap.as_ref().into()
    }
}

impl CanvasImageSource for Pixmap {
    fn pixels(&self) -> CanvasPixmapRef<'_> {
        self.as_ref().into()
    }
}

impl CanvasImageSource for canvas_utils_canvas2d::Canvas2dContext {
    fn pixels(&self) -> CanvasPixmapRef<'_> {
        self.pixmap_ref()
    }
}

/// Where image bytes come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Local(PathBuf),
    Remote(String),
}

impl ImageSource {
    /// `http://` and `https://` references are remote, everything else is a file path.
    pub fn infer(reference: &str) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            ImageSource::Remote(reference.to_string())
        } else {
            ImageSource::Local(PathBuf::from(reference))
        }
    }

    fn new(source: &str, is_local: bool) -> Self {
        if is_local {
            ImageSource::Local(PathBuf::from(source))
        } else {
            ImageSource::Remote(source.to_string())
        }
    }
}

#[derive(Clone, Debug)]
pub struct ImageLoaderConfig {
    /// Sent with every remote request.
    pub user_agent: String,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment (default: true).
    pub system_proxy: bool,
}

impl Default for ImageLoaderConfig {
    fn default() -> Self {
        Self {
            user_agent: CANVAS_UTILS_USER_AGENT.to_string(),
            system_proxy: true,
        }
    }
}

/// Loads images through its own HTTP client.
///
/// [`load_image`] covers the common case with a process-wide client.
#[derive(Clone, Debug)]
pub struct ImageLoader {
    client: Client,
}

impl ImageLoader {
    pub fn new(config: ImageLoaderConfig) -> CanvasUtilsResult<Self> {
        let mut builder = reqwest::ClientBuilder::new().user_agent(config.user_agent);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    pub async fn load(&self, source: &ImageSource) -> CanvasUtilsResult<ImageHandle> {
        load_with_client(&self.client, source).await
    }
}

/// Load and decode an image from a local path (`is_local`) or an HTTP(S) URL.
pub async fn load_image(source: &str, is_local: bool) -> CanvasUtilsResult<ImageHandle> {
    load_with_client(&REQWEST_CLIENT, &ImageSource::new(source, is_local)).await
}

async fn load_with_client(client: &Client, source: &ImageSource) -> CanvasUtilsResult<ImageHandle> {
    let bytes = match source {
        ImageSource::Local(path) => read_local(path).await?,
        ImageSource::Remote(url) => fetch_remote(client, url).await?,
    };
    ImageHandle::from_bytes(&bytes)
}

async fn read_local(path: &Path) -> CanvasUtilsResult<Vec<u8>> {
    info!("Loading image: {}", path.display());
    tokio::fs::read(path)
        .await
        .map_err(|source| CanvasUtilsError::Io {
            path: path.to_path_buf(),
            source,
        })
}

async fn fetch_remote(client: &Client, url: &str) -> CanvasUtilsResult<Vec<u8>> {
    info!("Fetching image: {url}");
    let response = client.get(url).send().await?;
    match response.status() {
        StatusCode::OK => {
            let bytes = response.bytes().await?;
            if bytes.is_empty() {
                return Err(CanvasUtilsError::EmptyBody {
                    url: url.to_string(),
                });
            }
            Ok(bytes.to_vec())
        }
        status => {
            error!("Failed to load image from url {url} with status code {status:?}");
            Err(CanvasUtilsError::HttpStatus {
                url: url.to_string(),
                status,
            })
        }
    }
}
