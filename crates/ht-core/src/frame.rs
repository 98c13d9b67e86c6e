use crate::error::CoreError;

/// Buffer de pixels couleur tel que décodé par la source.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use ht_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer pré-alloué aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use ht_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Échantillon RGBA du pixel (x, y), ou `None` hors de l'image.
    ///
    /// # Example
    /// ```
    /// use ht_core::frame::FrameBuffer;
    /// let mut fb = FrameBuffer::new(2, 1);
    /// fb.data[4..].copy_from_slice(&[10, 20, 30, 255]);
    /// assert_eq!(fb.pixel(1, 0), Some([10, 20, 30, 255]));
    /// assert_eq!(fb.pixel(2, 0), None);
    /// ```
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(start..start + 4)?.try_into().ok()
    }

    /// Luminance BT.601 du pixel (x, y), alpha ignoré ; 0 hors de l'image.
    ///
    /// # Example
    /// ```
    /// use ht_core::frame::FrameBuffer;
    /// let mut fb = FrameBuffer::new(1, 1);
    /// fb.data.copy_from_slice(&[255, 255, 255, 0]);
    /// assert_eq!(fb.luminance(0, 0), 255);
    /// ```
    #[inline]
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y).map_or(0, |[r, g, b, _]| luma_bt601(r, g, b))
    }

    /// Convert the whole frame to a single-channel grayscale raster, one
    /// [`luminance`](Self::luminance) sample per pixel.
    ///
    /// # Example
    /// ```
    /// use ht_core::frame::FrameBuffer;
    /// let mut fb = FrameBuffer::new(2, 1);
    /// fb.data.copy_from_slice(&[255, 0, 0, 255, 0, 0, 255, 255]);
    /// let gray = fb.to_grayscale();
    /// assert_eq!(gray.as_raw(), &[76, 29]);
    /// ```
    #[must_use]
    pub fn to_grayscale(&self) -> Raster {
        let data = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| self.luminance(x, y)))
            .collect();
        Raster {
            data,
            width: self.width,
            height: self.height,
        }
    }
}

#[inline(always)]
fn luma_bt601(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500) / 1000) as u8
}

/// Grille 8 bits mono-canal, row-major.
///
/// Porte aussi bien l'image en niveaux de gris d'entrée que le résultat
/// bitonal (0/255) d'un filtre. Une largeur ou hauteur nulle donne une
/// grille vide, valide.
///
/// # Example
/// ```
/// use ht_core::frame::Raster;
/// let mut r = Raster::new(4, 3);
/// r.set(1, 2, 200);
/// assert_eq!(r.get(1, 2), 200);
/// assert_eq!(r.as_raw().len(), 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Raster {
    /// Zero-filled raster.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
    }

    /// Raster where every sample equals `value`.
    ///
    /// # Example
    /// ```
    /// use ht_core::frame::Raster;
    /// let r = Raster::filled(2, 2, 128);
    /// assert!(r.as_raw().iter().all(|&v| v == 128));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            data: vec![value; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::BufferSize`] if `data.len() != width * height`.
    ///
    /// # Example
    /// ```
    /// use ht_core::frame::Raster;
    /// assert!(Raster::from_raw(2, 2, vec![0; 4]).is_ok());
    /// assert!(Raster::from_raw(2, 2, vec![0; 3]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels.
    #[inline(always)]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline(always)]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when either dimension is zero.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        y as usize * self.width as usize + x as usize
    }

    /// Sample at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[self.index(x, y)]
    }

    /// Overwrite the sample at (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Row `y` as a slice.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Row `y` as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.width as usize;
        &mut self.data[start..start + self.width as usize]
    }

    /// All samples, row-major.
    #[inline]
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// All samples, row-major, mutable.
    #[inline]
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the raster and return its buffer.
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// True when every sample is exactly 0 or 255.
    ///
    /// # Example
    /// ```
    /// use ht_core::frame::Raster;
    /// assert!(Raster::filled(3, 3, 255).is_bitonal());
    /// assert!(!Raster::filled(3, 3, 254).is_bitonal());
    /// ```
    #[must_use]
    pub fn is_bitonal(&self) -> bool {
        self.data.iter().all(|&v| v == 0 || v == 255)
    }

    fn check_region(&self, x: u32, y: u32, w: u32, h: u32) -> Result<(), CoreError> {
        let fits_x = x.checked_add(w).is_some_and(|right| right <= self.width);
        let fits_y = y.checked_add(h).is_some_and(|bottom| bottom <= self.height);
        if fits_x && fits_y {
            Ok(())
        } else {
            Err(CoreError::RegionOutOfBounds {
                x,
                y,
                w,
                h,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Copy the `w`×`h` sub-rectangle whose top-left corner is (x, y).
    ///
    /// # Errors
    /// Returns [`CoreError::RegionOutOfBounds`] if the rectangle leaves the raster.
    ///
    /// # Example
    /// ```
    /// use ht_core::frame::Raster;
    /// let r = Raster::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// let sub = r.copy_region(1, 0, 2, 2).unwrap();
    /// assert_eq!(sub.as_raw(), &[2, 3, 5, 6]);
    /// ```
    pub fn copy_region(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Raster, CoreError> {
        self.check_region(x, y, w, h)?;
        let mut data = Vec::with_capacity(w as usize * h as usize);
        for row in y..y + h {
            let start = self.index_unchecked(x, row);
            data.extend_from_slice(&self.data[start..start + w as usize]);
        }
        Ok(Raster {
            data,
            width: w,
            height: h,
        })
    }

    /// Paste `src` with its top-left corner at (x, y).
    ///
    /// # Errors
    /// Returns [`CoreError::RegionOutOfBounds`] if `src` does not fit.
    pub fn blit(&mut self, x: u32, y: u32, src: &Raster) -> Result<(), CoreError> {
        self.check_region(x, y, src.width, src.height)?;
        for row in 0..src.height {
            let start = self.index_unchecked(x, y + row);
            self.data[start..start + src.width as usize].copy_from_slice(src.row(row));
        }
        Ok(())
    }

    // Region checks cover bounds; also valid for zero-width regions at x == width.
    #[inline(always)]
    fn index_unchecked(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_raster_is_valid() {
        let r = Raster::new(0, 5);
        assert!(r.is_empty());
        assert!(r.is_bitonal());
        assert_eq!(r.height(), 5);
    }

    #[test]
    fn region_out_of_bounds_rejected() {
        let r = Raster::new(4, 4);
        assert!(matches!(
            r.copy_region(2, 2, 3, 1),
            Err(CoreError::RegionOutOfBounds { .. })
        ));
        assert!(r.copy_region(u32::MAX, 0, 2, 1).is_err());
    }

    #[test]
    fn blit_writes_only_target_window() {
        let mut r = Raster::filled(4, 4, 9);
        let patch = Raster::filled(2, 2, 0);
        r.blit(1, 1, &patch).unwrap();
        assert_eq!(r.row(0), &[9, 9, 9, 9]);
        assert_eq!(r.row(1), &[9, 0, 0, 9]);
        assert_eq!(r.row(2), &[9, 0, 0, 9]);
        assert_eq!(r.row(3), &[9, 9, 9, 9]);
    }

    #[test]
    fn grayscale_conversion_weights() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.data
            .copy_from_slice(&[0, 255, 0, 255, 0, 0, 255, 255, 128, 128, 128, 0]);
        let gray = fb.to_grayscale();
        assert_eq!(gray.as_raw(), &[150, 29, 128]);
        assert_eq!(gray.width(), 3);
        assert_eq!(gray.height(), 1);
    }

    #[test]
    fn grayscale_matches_per_pixel_luminance() {
        let mut fb = FrameBuffer::new(5, 3);
        for (i, v) in fb.data.iter_mut().enumerate() {
            *v = (i * 37 % 256) as u8;
        }
        let gray = fb.to_grayscale();
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(gray.get(x, y), fb.luminance(x, y), "({x}, {y})");
            }
        }
        assert_eq!(fb.pixel(5, 0), None);
        assert_eq!(fb.luminance(0, 3), 0);
    }
}
