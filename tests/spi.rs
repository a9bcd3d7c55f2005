mod tests {
    use embedded_hal::spi::{ErrorKind, ErrorType, SpiBus};
    use smart_leds::SmartLedsWrite;
    use ws2812_strip::{
        Channel, ChannelOrder, Error, FramePattern, Handle, LedStrip, Rgb, SpiConfig, Ws2812Spi,
        spi::reset_frames, spi_buffer_size,
    };

    const PATTERN: FramePattern = FramePattern::DEFAULT;

    /// Bus that records every write and fails the ones scripted to fail
    #[derive(Default)]
    struct RecordingBus {
        writes: Vec<Vec<u8>>,
        failures: Vec<(usize, ErrorKind)>,
    }

    impl RecordingBus {
        fn failing(failures: &[(usize, ErrorKind)]) -> Self {
            Self {
                writes: Vec::new(),
                failures: failures.to_vec(),
            }
        }
    }

    impl ErrorType for RecordingBus {
        type Error = ErrorKind;
    }

    impl SpiBus<u8> for RecordingBus {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            let index = self.writes.len();
            self.writes.push(words.to_vec());
            match self.failures.iter().find(|(at, _)| *at == index) {
                Some((_, kind)) => Err(*kind),
                None => Ok(()),
            }
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn frames_of(byte: u8) -> Vec<u8> {
        (0..8)
            .map(|bit| {
                if byte & (0x80 >> bit) != 0 {
                    PATTERN.one
                } else {
                    PATTERN.zero
                }
            })
            .collect()
    }

    /// Turn a frame stream back into the wire bytes it encodes
    fn decode(frames: &[u8]) -> Vec<u8> {
        frames
            .chunks(8)
            .map(|chunk| {
                chunk.iter().fold(0u8, |byte, frame| {
                    assert!(*frame == PATTERN.one || *frame == PATTERN.zero);
                    (byte << 1) | u8::from(*frame == PATTERN.one)
                })
            })
            .collect()
    }

    fn reset_write() -> Vec<u8> {
        vec![0; reset_frames(4_000_000)]
    }

    #[test]
    fn test_update_rgb_primary_colors() {
        let mut bus = RecordingBus::default();
        let config = SpiConfig::new(3).with_order(ChannelOrder::RGB);
        {
            let mut strip = Ws2812Spi::<_, { spi_buffer_size(3, false) }>::new(&mut bus, &config)
                .expect("valid config");
            let pixels = [Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)];
            assert_eq!(strip.update_rgb(&pixels), Ok(()));
        }

        assert_eq!(bus.writes.len(), 2);
        let data = &bus.writes[0];
        assert_eq!(data.len(), 72);
        assert_eq!(decode(data), vec![255, 0, 0, 0, 255, 0, 0, 0, 255]);
        assert_eq!(&data[..8], frames_of(255).as_slice());
        assert_eq!(&data[8..16], frames_of(0).as_slice());
        assert_eq!(bus.writes[1], reset_write());
        assert_eq!(bus.writes[1].len(), 4);
    }

    #[test]
    fn test_update_rgb_grb_order() {
        let mut bus = RecordingBus::default();
        {
            let mut strip =
                Ws2812Spi::<_, 48>::new(&mut bus, &SpiConfig::new(2)).expect("valid config");
            let pixels = [Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)];
            assert_eq!(strip.update_rgb(&pixels), Ok(()));
        }
        assert_eq!(decode(&bus.writes[0]), vec![2, 1, 3, 5, 4, 6]);
    }

    #[test]
    fn test_every_permutation_lands_in_place() {
        for white in [None, Some(())] {
            let stride: u8 = if white.is_some() { 4 } else { 3 };
            let mut valid = 0;
            for red in 0..stride {
                for green in 0..stride {
                    for blue in 0..stride {
                        for white_pos in 0..stride {
                            let white = white.map(|()| white_pos);
                            if white.is_none() && white_pos != 0 {
                                continue;
                            }
                            let Ok(order) = ChannelOrder::new(red, green, blue, white) else {
                                continue;
                            };
                            valid += 1;
                            check_order(order);
                        }
                    }
                }
            }
            assert_eq!(valid, if white.is_some() { 24 } else { 6 });
        }
    }

    fn check_order(order: ChannelOrder) {
        let pixels = [Rgb::new(10, 20, 30), Rgb::new(40, 50, 60)];
        let mut bus = RecordingBus::default();
        {
            let config = SpiConfig::new(2).with_order(order);
            let mut strip = Ws2812Spi::<_, 64>::new(&mut bus, &config).expect("valid config");
            strip.update_rgb(&pixels).expect("bus accepts writes");
        }
        let wire = decode(&bus.writes[0]);
        let stride = order.stride();
        assert_eq!(wire.len(), stride * pixels.len());
        for (i, pixel) in pixels.iter().enumerate() {
            for (channel, value) in [
                (Channel::Red, pixel.r),
                (Channel::Green, pixel.g),
                (Channel::Blue, pixel.b),
                (Channel::White, 0),
            ] {
                if let Some(pos) = order.position(channel) {
                    assert_eq!(wire[stride * i + pos], value);
                }
            }
        }
    }

    #[test]
    fn test_white_channel_is_always_zero() {
        let mut bus = RecordingBus::default();
        {
            let config = SpiConfig::new(1).with_order(ChannelOrder::GRBW);
            let mut strip = Ws2812Spi::<_, 32>::new(&mut bus, &config).expect("valid config");
            strip
                .update_rgb(&[Rgb::new(255, 255, 255)])
                .expect("bus accepts writes");
        }
        let data = &bus.writes[0];
        assert_eq!(data.len(), 32);
        assert_eq!(&data[24..], [PATTERN.zero; 8].as_slice());
        assert_eq!(decode(data), vec![255, 255, 255, 0]);
    }

    #[test]
    fn test_capacity_exceeded_sends_nothing() {
        let mut bus = RecordingBus::default();
        {
            let mut strip =
                Ws2812Spi::<_, 72>::new(&mut bus, &SpiConfig::new(3)).expect("valid config");
            assert_eq!(strip.capacity(), 3);
            let pixels = [Rgb::default(); 4];
            assert_eq!(
                strip.update_rgb(&pixels),
                Err(Error::CapacityExceeded {
                    requested: 4,
                    capacity: 3
                })
            );
            assert_eq!(
                strip.write(pixels.iter().copied()),
                Err(Error::CapacityExceeded {
                    requested: 4,
                    capacity: 3
                })
            );
        }
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn test_write_failure_still_resets() {
        let mut bus = RecordingBus::failing(&[(0, ErrorKind::Overrun)]);
        {
            let mut strip =
                Ws2812Spi::<_, 24>::new(&mut bus, &SpiConfig::new(1)).expect("valid config");
            assert_eq!(
                strip.update_rgb(&[Rgb::new(1, 1, 1)]),
                Err(Error::BusFailure(ErrorKind::Overrun))
            );
        }
        assert_eq!(bus.writes.len(), 2);
        assert_eq!(bus.writes[1], reset_write());
    }

    #[test]
    fn test_write_error_wins_over_reset_error() {
        let mut bus =
            RecordingBus::failing(&[(0, ErrorKind::Overrun), (1, ErrorKind::ModeFault)]);
        {
            let mut strip =
                Ws2812Spi::<_, 24>::new(&mut bus, &SpiConfig::new(1)).expect("valid config");
            assert_eq!(
                strip.update_rgb(&[Rgb::new(1, 1, 1)]),
                Err(Error::BusFailure(ErrorKind::Overrun))
            );
        }
        assert_eq!(bus.writes.len(), 2);
        assert_eq!(bus.writes[1], reset_write());
    }

    #[test]
    fn test_reset_error_reported_after_good_write() {
        let mut bus = RecordingBus::failing(&[(1, ErrorKind::ModeFault)]);
        {
            let mut strip =
                Ws2812Spi::<_, 24>::new(&mut bus, &SpiConfig::new(1)).expect("valid config");
            assert_eq!(
                strip.update_rgb(&[Rgb::new(1, 1, 1)]),
                Err(Error::BusFailure(ErrorKind::ModeFault))
            );
        }
        assert_eq!(bus.writes.len(), 2);
    }

    #[test]
    fn test_update_channels_one_write_per_channel() {
        let mut bus = RecordingBus::default();
        {
            let mut strip =
                Ws2812Spi::<_, 24>::new(&mut bus, &SpiConfig::new(1)).expect("valid config");
            assert_eq!(strip.update_channels(&[0x80, 0x01, 0xFF]), Ok(()));
        }
        assert_eq!(bus.writes.len(), 4);
        assert_eq!(bus.writes[0], frames_of(0x80));
        assert_eq!(bus.writes[1], frames_of(0x01));
        assert_eq!(bus.writes[2], frames_of(0xFF));
        assert_eq!(bus.writes[3], reset_write());
    }

    #[test]
    fn test_update_channels_stops_at_failure() {
        let mut bus = RecordingBus::failing(&[(1, ErrorKind::Overrun)]);
        {
            let mut strip =
                Ws2812Spi::<_, 24>::new(&mut bus, &SpiConfig::new(1)).expect("valid config");
            assert_eq!(
                strip.update_channels(&[1, 2, 3, 4]),
                Err(Error::BusFailure(ErrorKind::Overrun))
            );
        }
        assert_eq!(bus.writes.len(), 3);
        assert_eq!(bus.writes[0], frames_of(1));
        assert_eq!(bus.writes[1], frames_of(2));
        assert_eq!(bus.writes[2], reset_write());
    }

    #[test]
    fn test_smart_leds_write_stages_iterator() {
        let mut bus = RecordingBus::default();
        {
            let config = SpiConfig::new(2).with_order(ChannelOrder::RGB);
            let mut strip = Ws2812Spi::<_, 48>::new(&mut bus, &config).expect("valid config");
            let colors = [(9u8, 8u8, 7u8), (6, 5, 4)];
            strip
                .write(colors.iter().map(|&(r, g, b)| Rgb::new(r, g, b)))
                .expect("bus accepts writes");
        }
        assert_eq!(bus.writes.len(), 2);
        assert_eq!(decode(&bus.writes[0]), vec![9, 8, 7, 6, 5, 4]);
    }

    #[test]
    fn test_reset_scales_with_frequency() {
        let mut bus = RecordingBus::default();
        {
            let config = SpiConfig::new(1)
                .with_frequency(8_000_000)
                .with_pattern(FramePattern::new(0xF8, 0xC0));
            let mut strip = Ws2812Spi::<_, 24>::new(&mut bus, &config).expect("valid config");
            assert_eq!(strip.reset_frames(), 7);
            strip.update_rgb(&[]).expect("bus accepts writes");
        }
        assert_eq!(bus.writes.len(), 2);
        assert!(bus.writes[0].is_empty());
        assert_eq!(bus.writes[1], vec![0; 7]);
    }

    #[test]
    fn test_construction_errors() {
        let mut bus = RecordingBus::default();
        assert_eq!(
            Ws2812Spi::<_, 47>::new(&mut bus, &SpiConfig::new(2)).err(),
            Some(Error::InvalidConfig)
        );
        assert_eq!(
            Ws2812Spi::<_, 24>::new(&mut bus, &SpiConfig::new(1).with_frequency(0)).err(),
            Some(Error::InvalidConfig)
        );
        assert_eq!(
            Ws2812Spi::<_, 24>::new(
                &mut bus,
                &SpiConfig::new(1).with_pattern(FramePattern::new(0x40, 0x40))
            )
            .err(),
            Some(Error::InvalidConfig)
        );
        assert_eq!(
            Ws2812Spi::<_, 24>::new(&mut bus, &SpiConfig::new(1).with_frequency(400_000_000))
                .err(),
            Some(Error::InvalidConfig)
        );
        assert_eq!(
            Ws2812Spi::<RecordingBus, 24>::bind(None, &SpiConfig::new(1)).err(),
            Some(Error::DeviceNotFound(Handle::Bus))
        );
        assert!(bus.writes.is_empty());
    }
}
