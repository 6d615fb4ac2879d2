#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use julia_benchmark::{
        core::error::JuliaError,
        fractals::grid::{build_grid, AxisSamples, GridSampling, Region, MAX_POINT_COUNT},
    };
    use more_asserts::{assert_ge, assert_gt, assert_le, assert_lt};
    use num::complex::Complex64;

    fn reference_parameter() -> Complex64 {
        Complex64::new(-0.62772, -0.42193)
    }

    #[test]
    fn test_accumulated_axis_lengths_match_reference() {
        let region = Region::default();
        // Accumulated rounding adds an extra sample at this width.
        let axes = AxisSamples::new(&region, 10, GridSampling::Accumulate).unwrap();
        assert_eq!((axes.x.len(), axes.y.len()), (11, 11));

        for width in [100, 200, 1000].iter() {
            let axes = AxisSamples::new(&region, *width, GridSampling::Accumulate).unwrap();
            assert_eq!(axes.x.len(), *width as usize);
            assert_eq!(axes.y.len(), *width as usize);
        }
    }

    #[test]
    fn test_axis_lengths_within_one_of_width() {
        let region = Region {
            x_min: -0.7,
            x_max: 1.3,
            y_min: -2.1,
            y_max: 0.4,
        };
        for width in 1..200u32 {
            let axes = AxisSamples::new(&region, width, GridSampling::Accumulate).unwrap();
            for len in [axes.x.len(), axes.y.len()].iter() {
                assert_ge!(*len as i64, width as i64 - 1);
                assert_le!(*len as i64, width as i64 + 1);
            }
        }
    }

    #[test]
    fn test_axis_order_and_bounds() {
        let region = Region::default();
        let axes = AxisSamples::new(&region, 1000, GridSampling::Accumulate).unwrap();

        assert_eq!(axes.x[0], region.x_min);
        assert_eq!(axes.y[0], region.y_max);
        for pair in axes.x.windows(2) {
            assert_lt!(pair[0], pair[1]);
        }
        for pair in axes.y.windows(2) {
            assert_gt!(pair[0], pair[1]);
        }
        assert_lt!(*axes.x.last().unwrap(), region.x_max);
        assert_gt!(*axes.y.last().unwrap(), region.y_min);
    }

    #[test]
    fn test_x_axis_is_built_by_repeated_addition() {
        let region = Region::default();
        let axes = AxisSamples::new(&region, 1000, GridSampling::Accumulate).unwrap();
        let step = region.x_step(1000);
        let mut expected = region.x_min;
        for sample in axes.x.iter() {
            assert_eq!(*sample, expected);
            expected += step;
        }
    }

    #[test]
    fn test_interpolated_axes_have_exact_width() {
        let region = Region::default();
        let width = 10;
        let axes = AxisSamples::new(&region, width, GridSampling::Interpolate).unwrap();
        assert_eq!(axes.x.len(), width as usize);
        assert_eq!(axes.y.len(), width as usize);

        let tol = 1e-12;
        let x_expected = iter_num_tools::lin_space(region.x_min..region.x_max, width as usize);
        for (actual, expected) in axes.x.iter().zip(x_expected) {
            assert_relative_eq!(*actual, expected, epsilon = tol);
        }
        let y_expected = iter_num_tools::lin_space(region.y_max..region.y_min, width as usize);
        for (actual, expected) in axes.y.iter().zip(y_expected) {
            assert_relative_eq!(*actual, expected, epsilon = tol);
        }
    }

    #[test]
    fn test_cross_product_is_row_major() {
        let parameter = reference_parameter();
        let grid = build_grid(&Region::default(), 20, GridSampling::Accumulate, parameter).unwrap();
        let n_cols = grid.axes.x.len();

        assert_eq!(grid.batch.len(), grid.axes.point_count());
        assert_eq!(grid.batch.len(), grid.axes.x.len() * grid.axes.y.len());
        for (index, start) in grid.batch.starts().iter().enumerate() {
            let row = index / n_cols;
            let col = index % n_cols;
            assert_eq!(*start, Complex64::new(grid.axes.x[col], grid.axes.y[row]));
        }
        assert!(grid.batch.params().iter().all(|c| *c == parameter));
    }

    #[test]
    fn test_zero_width_is_rejected() {
        let result = AxisSamples::new(&Region::default(), 0, GridSampling::Accumulate);
        assert!(matches!(result, Err(JuliaError::InvalidWidth)));
    }

    #[test]
    fn test_oversized_width_is_rejected() {
        let result = build_grid(
            &Region::default(),
            100_000,
            GridSampling::Accumulate,
            reference_parameter(),
        );
        assert!(matches!(
            result,
            Err(JuliaError::GridTooLarge {
                desired_width: 100_000,
                ..
            })
        ));

        let largest_allowed = (MAX_POINT_COUNT as f64).sqrt() as u32 - 1;
        assert!(Region::default().validate(largest_allowed).is_ok());
        assert!(Region::default().validate(largest_allowed + 1).is_err());
    }

    #[test]
    fn test_degenerate_regions_are_rejected() {
        let inverted = Region {
            x_min: 1.0,
            x_max: -1.0,
            ..Region::default()
        };
        let empty = Region {
            y_min: 0.5,
            y_max: 0.5,
            ..Region::default()
        };
        let unbounded = Region {
            x_max: f64::INFINITY,
            ..Region::default()
        };
        let too_fine = Region {
            x_min: 1.0e20,
            x_max: 1.0e20 + 1.0e5,
            ..Region::default()
        };
        for region in [inverted, empty, unbounded, too_fine].iter() {
            let result = AxisSamples::new(region, 1000, GridSampling::Accumulate);
            assert!(
                matches!(result, Err(JuliaError::InvalidRegion(_))),
                "expected {:?} to be rejected",
                region
            );
        }
    }
}
