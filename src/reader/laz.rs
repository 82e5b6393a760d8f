use super::ReadPoints;
use crate::{
    Header, Point, Result,
    codec::{CodecEngine, Pointer},
    point::decode_point,
};
use log::{Level, log};

/// An open decompression session: an engine, its two arena blocks and its stream.
///
/// The session owns all of them as one unit. Dropping it, on whatever path, destroys the stream
/// and frees every block that was allocated, including when opening failed half way.
#[derive(Debug)]
pub struct Session<E: CodecEngine> {
    engine: E,
    source: Option<Pointer>,
    destination: Option<Pointer>,
    window: Vec<u8>,
}

impl<E: CodecEngine> Session<E> {
    /// Copies a whole compressed file into the engine's arena and opens a stream over it.
    ///
    /// Each call to [Session::next_record] then yields one `record_length` byte record.
    pub fn open(engine: E, bytes: &[u8], record_length: u16) -> Result<Session<E>> {
        let mut session = Session {
            engine,
            source: None,
            destination: None,
            window: vec![0; usize::from(record_length)],
        };
        let source = session.engine.malloc(bytes.len())?;
        session.source = Some(source);
        let destination = session.engine.malloc(usize::from(record_length))?;
        session.destination = Some(destination);
        session.engine.write(source, bytes)?;
        session.engine.open(source, bytes.len())?;
        log!(
            Level::Debug,
            "opened a compressed stream over {} bytes",
            bytes.len()
        );
        Ok(session)
    }

    /// Decompresses the next record and returns it.
    pub fn next_record(&mut self) -> Result<&[u8]> {
        if let Some(destination) = self.destination {
            self.engine.get_point(destination)?;
            self.engine.read(destination, &mut self.window)?;
        }
        Ok(&self.window)
    }

    /// Returns the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: CodecEngine> Drop for Session<E> {
    fn drop(&mut self) {
        self.engine.destroy();
        if let Some(destination) = self.destination.take() {
            self.engine.free(destination);
        }
        if let Some(source) = self.source.take() {
            self.engine.free(source);
        }
        log!(Level::Debug, "closed a compressed stream");
    }
}

pub(crate) struct PointReader<'a, E: CodecEngine> {
    session: Session<E>,
    header: &'a Header,
    index: u64,
}

impl<'a, E: CodecEngine> PointReader<'a, E> {
    pub(crate) fn new(session: Session<E>, header: &'a Header) -> PointReader<'a, E> {
        PointReader {
            session,
            header,
            index: 0,
        }
    }
}

impl<E: CodecEngine> ReadPoints for PointReader<'_, E> {
    fn read_point(&mut self) -> Result<Option<Point>> {
        if self.index < self.header.number_of_points() {
            self.index += 1;
            let window = self.session.next_record()?;
            Ok(Some(decode_point(
                window,
                self.header.point_format(),
                self.header.transforms(),
            )))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Version, codec::Arena, raw};
    use std::{cell::RefCell, rc::Rc};

    #[derive(Default)]
    struct Calls {
        freed: Vec<Pointer>,
        destroyed: bool,
    }

    struct Engine {
        arena: Arena,
        calls: Rc<RefCell<Calls>>,
        fail_open: bool,
        fail_second_malloc: bool,
        fail_get_point_after: Option<usize>,
        points: usize,
    }

    impl Engine {
        fn new(calls: &Rc<RefCell<Calls>>) -> Engine {
            Engine {
                arena: Arena::new(),
                calls: Rc::clone(calls),
                fail_open: false,
                fail_second_malloc: false,
                fail_get_point_after: None,
                points: 0,
            }
        }
    }

    impl CodecEngine for Engine {
        fn malloc(&mut self, len: usize) -> Result<Pointer> {
            if self.fail_second_malloc && self.arena.allocated() == 1 {
                Err(Error::CompressedStream("out of memory".to_string()))
            } else {
                Ok(self.arena.malloc(len))
            }
        }

        fn free(&mut self, pointer: Pointer) {
            assert!(self.arena.free(pointer));
            self.calls.borrow_mut().freed.push(pointer);
        }

        fn write(&mut self, pointer: Pointer, bytes: &[u8]) -> Result<()> {
            self.arena.write(pointer, bytes)
        }

        fn read(&self, pointer: Pointer, out: &mut [u8]) -> Result<()> {
            self.arena.read(pointer, out)
        }

        fn open(&mut self, _: Pointer, _: usize) -> Result<()> {
            if self.fail_open {
                Err(Error::CompressedStream("bad stream".to_string()))
            } else {
                Ok(())
            }
        }

        fn get_point(&mut self, destination: Pointer) -> Result<()> {
            if self.fail_get_point_after == Some(self.points) {
                return Err(Error::CompressedStream("desync".to_string()));
            }
            self.points += 1;
            let block = self.arena.get_mut(destination)?;
            block[0] = block[0].wrapping_add(1);
            Ok(())
        }

        fn destroy(&mut self) {
            self.calls.borrow_mut().destroyed = true;
        }
    }

    #[test]
    fn records() {
        let calls = Rc::default();
        let mut session = Session::open(Engine::new(&calls), &[0; 8], 4).unwrap();
        assert_eq!(&[1, 0, 0, 0], session.next_record().unwrap());
        assert_eq!(&[2, 0, 0, 0], session.next_record().unwrap());
        assert_eq!(2, session.engine().arena.allocated());
    }

    #[test]
    fn drop_releases_everything() {
        let calls = Rc::default();
        let session = Session::open(Engine::new(&calls), &[0; 8], 4).unwrap();
        drop(session);
        let calls = calls.borrow();
        assert!(calls.destroyed);
        assert_eq!(2, calls.freed.len());
    }

    #[test]
    fn failed_open_releases_everything() {
        let calls = Rc::default();
        let mut engine = Engine::new(&calls);
        engine.fail_open = true;
        assert!(Session::open(engine, &[0; 8], 4).is_err());
        let calls = calls.borrow();
        assert!(calls.destroyed);
        assert_eq!(2, calls.freed.len());
    }

    #[test]
    fn failed_record_releases_everything() {
        let calls = Rc::default();
        let mut engine = Engine::new(&calls);
        engine.fail_get_point_after = Some(3);
        let mut session = Session::open(engine, &[0; 8], 4).unwrap();
        for _ in 0..3 {
            let _ = session.next_record().unwrap();
        }
        assert!(matches!(
            session.next_record(),
            Err(Error::CompressedStream(_))
        ));
        assert!(!calls.borrow().destroyed);
        assert_eq!(2, session.engine().arena.allocated());
        drop(session);
        let calls = calls.borrow();
        assert!(calls.destroyed);
        assert_eq!(vec![Pointer(1), Pointer(0)], calls.freed);
    }

    #[test]
    fn failed_record_through_reader() {
        let calls = Rc::default();
        let mut engine = Engine::new(&calls);
        engine.fail_get_point_after = Some(1);
        let header = Header::from_raw(raw::Header {
            file_signature: raw::LASF,
            version: Version::new(1, 2),
            point_data_record_length: 20,
            number_of_point_records: 5,
            ..Default::default()
        })
        .unwrap();
        let session = Session::open(engine, &[0; 8], 20).unwrap();
        let mut reader = PointReader::new(session, &header);
        let mut points = Vec::new();
        assert!(matches!(
            reader.read_points(5, &mut points),
            Err(Error::CompressedStream(_))
        ));
        assert_eq!(1, points.len());
        drop(reader);
        let calls = calls.borrow();
        assert!(calls.destroyed);
        assert_eq!(2, calls.freed.len());
    }

    #[test]
    fn failed_allocation_frees_the_first_block() {
        let calls = Rc::default();
        let mut engine = Engine::new(&calls);
        engine.fail_second_malloc = true;
        assert!(Session::open(engine, &[0; 8], 4).is_err());
        assert_eq!(vec![Pointer(0)], calls.borrow().freed);
    }

    #[test]
    fn source_too_small() {
        struct Short(Engine);
        impl CodecEngine for Short {
            fn malloc(&mut self, _: usize) -> Result<Pointer> {
                self.0.malloc(1)
            }
            fn free(&mut self, pointer: Pointer) {
                self.0.free(pointer)
            }
            fn write(&mut self, pointer: Pointer, bytes: &[u8]) -> Result<()> {
                self.0.write(pointer, bytes)
            }
            fn read(&self, pointer: Pointer, out: &mut [u8]) -> Result<()> {
                self.0.read(pointer, out)
            }
            fn open(&mut self, pointer: Pointer, len: usize) -> Result<()> {
                self.0.open(pointer, len)
            }
            fn get_point(&mut self, destination: Pointer) -> Result<()> {
                self.0.get_point(destination)
            }
            fn destroy(&mut self) {
                self.0.destroy()
            }
        }
        let calls = Rc::default();
        assert!(matches!(
            Session::open(Short(Engine::new(&calls)), &[0; 8], 4),
            Err(Error::CompressedStream(_))
        ));
        assert_eq!(2, calls.borrow().freed.len());
    }
}
