//! Decode a whole las or laz file into a [Dataset].
//!
//! A [Parser] turns one immutable byte buffer into a header, its points, their statistics and,
//! optionally, a geographic extent. Nothing is returned until the whole buffer has been decoded.
//!
//! ```
//! use las_dataset::{Parser, ParseOptions, Truncation};
//! let mut bytes = vec![0u8; 227];
//! bytes[0..4].copy_from_slice(b"LASF");
//! bytes[24] = 1;
//! bytes[25] = 2;
//! bytes[96..100].copy_from_slice(&227u32.to_le_bytes());
//! bytes[105..107].copy_from_slice(&20u16.to_le_bytes());
//! bytes[107..111].copy_from_slice(&1u32.to_le_bytes());
//!
//! let parser = Parser::new(ParseOptions::default().with_truncation(Truncation::Strict));
//! assert!(parser.parse(&bytes).is_err());
//!
//! let dataset = Parser::default().parse(&bytes).unwrap();
//! assert_eq!(0, dataset.statistics().total_points);
//! ```

use crate::{
    Error, Header, Point, Result, Statistics, Vlr,
    codec::{DefaultCodec, PointCodec},
    reader::{self, ReadPoints},
    reproject::{GeoExtent, Proj4rs, Projection, ProjectionDefinitions},
    vlr,
};
use log::{Level, log};
use std::{
    fs,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    task::Poll,
};

const DEFAULT_YIELD_EVERY: u64 = 65_536;

/// What to do when the buffer ends before the declared number of points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Truncation {
    /// Stop at the last complete record and keep what was decoded.
    #[default]
    Lenient,
    /// Fail with [Error::BufferTruncated](crate::Error::BufferTruncated).
    Strict,
}

/// A flag that stops a parse at its next batch boundary.
///
/// # Examples
///
/// ```
/// use las_dataset::Cancellation;
/// let cancellation = Cancellation::new();
/// let clone = cancellation.clone();
/// clone.cancel();
/// assert!(cancellation.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    /// Creates a flag that is not set.
    pub fn new() -> Cancellation {
        Cancellation::default()
    }

    /// Sets the flag.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true if the flag is set.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for a [Parser].
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// What to do with a buffer that is shorter than its header says.
    pub truncation: Truncation,

    /// The number of points decoded between two yields and cancellation checks.
    ///
    /// Zero is treated as one.
    pub yield_every: u64,

    /// The definitions used to derive the geographic extent, if any.
    pub projection: Option<ProjectionDefinitions>,

    /// A flag checked between batches.
    pub cancellation: Option<Cancellation>,
}

impl Default for ParseOptions {
    fn default() -> ParseOptions {
        ParseOptions {
            truncation: Truncation::default(),
            yield_every: DEFAULT_YIELD_EVERY,
            projection: None,
            cancellation: None,
        }
    }
}

impl ParseOptions {
    /// Sets the truncation behavior.
    pub fn with_truncation(mut self, truncation: Truncation) -> ParseOptions {
        self.truncation = truncation;
        self
    }

    /// Sets the batch size.
    pub fn with_yield_every(mut self, yield_every: u64) -> ParseOptions {
        self.yield_every = yield_every;
        self
    }

    /// Sets the projection definitions.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::ParseOptions;
    /// use las_dataset::reproject::ProjectionDefinitions;
    /// let options = ParseOptions::default()
    ///     .with_projection(ProjectionDefinitions::to_wgs84("+proj=utm +zone=10 +datum=WGS84"));
    /// ```
    pub fn with_projection(mut self, projection: ProjectionDefinitions) -> ParseOptions {
        self.projection = Some(projection);
        self
    }

    /// Sets the cancellation flag.
    pub fn with_cancellation(mut self, cancellation: Cancellation) -> ParseOptions {
        self.cancellation = Some(cancellation);
        self
    }

    fn batch_size(&self) -> u64 {
        self.yield_every.max(1)
    }
}

/// Decodes whole-file buffers.
///
/// A parser holds no state between parses; every parse gets its own codec engine and its own
/// statistics, so one parser can be reused, or shared, freely.
#[derive(Clone, Debug)]
pub struct Parser<C = DefaultCodec, P = Proj4rs> {
    options: ParseOptions,
    codec: C,
    projection: P,
}

impl Parser {
    /// Creates a parser with the default codec and projection engine.
    pub fn new(options: ParseOptions) -> Parser {
        Parser {
            options,
            codec: DefaultCodec::default(),
            projection: Proj4rs,
        }
    }
}

impl Default for Parser {
    fn default() -> Parser {
        Parser::new(ParseOptions::default())
    }
}

impl<C: PointCodec, P: Projection> Parser<C, P> {
    /// Replaces the codec used for compressed point data.
    pub fn with_codec<D: PointCodec>(self, codec: D) -> Parser<D, P> {
        Parser {
            options: self.options,
            codec,
            projection: self.projection,
        }
    }

    /// Replaces the projection engine used for the geographic extent.
    pub fn with_projection<Q: Projection>(self, projection: Q) -> Parser<C, Q> {
        Parser {
            options: self.options,
            codec: self.codec,
            projection,
        }
    }

    /// Returns this parser's options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Decodes a whole-file buffer, start to finish.
    pub fn parse(&self, bytes: &[u8]) -> Result<Dataset> {
        let header = Header::read_from(bytes)?;
        let vlrs = read_vlrs(bytes, &header);
        let (points, statistics) = {
            let mut reader =
                reader::point_reader(bytes, &header, &self.codec, self.options.truncation)?;
            let mut decode = Decode::new(&self.options, &header, bytes.len());
            while decode.batch(reader.as_mut())? {}
            decode.finish()
        };
        Ok(self.dataset(header, vlrs, points, statistics))
    }

    /// Decodes a whole-file buffer, yielding to the executor between batches.
    ///
    /// The decode itself is the same as [Parser::parse]. Nothing else touches the parse while it
    /// is suspended.
    ///
    /// The returned future holds the point reader, and with it the codec engine, across its yields,
    /// so it is not `Send`. Drive it on the current thread, e.g. with
    /// `futures::executor::block_on` or a local task set.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::Parser;
    /// let mut bytes = vec![0u8; 227];
    /// bytes[0..4].copy_from_slice(b"LASF");
    /// bytes[24] = 1;
    /// bytes[25] = 2;
    /// bytes[105..107].copy_from_slice(&20u16.to_le_bytes());
    /// let dataset = futures::executor::block_on(Parser::default().parse_async(&bytes)).unwrap();
    /// assert!(dataset.points().is_empty());
    /// ```
    pub async fn parse_async(&self, bytes: &[u8]) -> Result<Dataset> {
        let header = Header::read_from(bytes)?;
        yield_now().await;
        let vlrs = read_vlrs(bytes, &header);
        let (points, statistics) = {
            let mut reader =
                reader::point_reader(bytes, &header, &self.codec, self.options.truncation)?;
            let mut decode = Decode::new(&self.options, &header, bytes.len());
            while decode.batch(reader.as_mut())? {
                log!(
                    Level::Trace,
                    "yielding after {} points",
                    decode.statistics.total_points
                );
                yield_now().await;
            }
            decode.finish()
        };
        Ok(self.dataset(header, vlrs, points, statistics))
    }

    fn dataset(
        &self,
        header: Header,
        vlrs: Vec<Vlr>,
        points: Vec<Point>,
        statistics: Statistics,
    ) -> Dataset {
        let geo_extent = self.options.projection.as_ref().and_then(|definitions| {
            match GeoExtent::from_bounds(&header.bounds(), definitions, &self.projection) {
                Ok(geo_extent) => Some(geo_extent),
                Err(err) => {
                    log!(Level::Warn, "dropping the geographic extent: {}", err);
                    None
                }
            }
        });
        Dataset {
            header,
            vlrs,
            points,
            statistics,
            geo_extent,
        }
    }
}

struct Decode<'a> {
    points: Vec<Point>,
    statistics: Statistics,
    batch_size: u64,
    cancellation: Option<&'a Cancellation>,
}

impl<'a> Decode<'a> {
    fn new(options: &'a ParseOptions, header: &Header, buffer_length: usize) -> Decode<'a> {
        let capacity = header
            .number_of_points()
            .min(buffer_length as u64 / u64::from(header.point_data_record_length()));
        Decode {
            points: Vec::with_capacity(usize::try_from(capacity).unwrap_or(0)),
            statistics: Statistics::default(),
            batch_size: options.batch_size(),
            cancellation: options.cancellation.as_ref(),
        }
    }

    /// Decodes one batch, returning false once the reader is exhausted.
    fn batch(&mut self, reader: &mut dyn ReadPoints) -> Result<bool> {
        if self.cancellation.is_some_and(Cancellation::is_cancelled) {
            log!(
                Level::Debug,
                "parse cancelled after {} points",
                self.statistics.total_points
            );
            return Err(Error::Cancelled);
        }
        let start = self.points.len();
        let n = reader.read_points(self.batch_size, &mut self.points)?;
        for point in &self.points[start..] {
            self.statistics.observe(point);
        }
        Ok(n == self.batch_size)
    }

    fn finish(self) -> (Vec<Point>, Statistics) {
        (self.points, self.statistics)
    }
}

fn read_vlrs(bytes: &[u8], header: &Header) -> Vec<Vlr> {
    match vlr::read_vlrs(bytes, header) {
        Ok(vlrs) => vlrs,
        Err(err) => {
            log!(Level::Warn, "ignoring variable length records: {}", err);
            Vec::new()
        }
    }
}

async fn yield_now() {
    let mut yielded = false;
    futures::future::poll_fn(|cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await
}

/// A decoded file: its header, variable length records, points and their statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    header: Header,
    vlrs: Vec<Vlr>,
    points: Vec<Point>,
    statistics: Statistics,
    geo_extent: Option<GeoExtent>,
}

impl Dataset {
    /// Decodes a whole-file buffer with the default options.
    pub fn from_bytes(bytes: &[u8]) -> Result<Dataset> {
        Parser::default().parse(bytes)
    }

    /// Reads a file into memory and decodes it with the default options.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_dataset::Dataset;
    /// assert!(Dataset::from_path("does/not/exist.las").is_err());
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Dataset> {
        let bytes = fs::read(path)?;
        Dataset::from_bytes(&bytes)
    }

    /// Returns the header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the variable length records.
    pub fn vlrs(&self) -> &[Vlr] {
        &self.vlrs
    }

    /// Returns the decoded points, in record order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the statistics of the decoded points.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Returns the geographic extent, if a projection was configured and succeeded.
    pub fn geo_extent(&self) -> Option<&GeoExtent> {
        self.geo_extent.as_ref()
    }

    /// Consumes this dataset, returning its points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}
