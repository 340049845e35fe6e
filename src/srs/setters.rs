//! Named projection setters
//!
//! Thin conveniences over [`SpatialReference::set_projection`]. Angles are
//! in degrees and distances in meters; they are converted to the
//! definition's own units on storage.

#![allow(clippy::too_many_arguments)]

use crate::srs::errors::SrsResult;
use crate::srs::projection::Projection;
use crate::srs::spatial_reference::SpatialReference;

impl SpatialReference {
    pub fn set_acea(&mut self, std_parallel_1: f64, std_parallel_2: f64, center_lat: f64, center_long: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::AlbersConicEqualArea { std_parallel_1, std_parallel_2, center_lat, center_long, false_easting, false_northing })
    }

    pub fn set_ae(&mut self, center_lat: f64, center_long: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::AzimuthalEquidistant { center_lat, center_long, false_easting, false_northing })
    }

    pub fn set_bonne(&mut self, std_parallel_1: f64, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::Bonne { std_parallel_1, central_meridian, false_easting, false_northing })
    }

    pub fn set_cs(&mut self, center_lat: f64, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::CassiniSoldner { center_lat, central_meridian, false_easting, false_northing })
    }

    pub fn set_cea(&mut self, std_parallel_1: f64, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::CylindricalEqualArea { std_parallel_1, central_meridian, false_easting, false_northing })
    }

    pub fn set_eckert_iv(&mut self, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::EckertIV { central_meridian, false_easting, false_northing })
    }

    pub fn set_eckert_vi(&mut self, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::EckertVI { central_meridian, false_easting, false_northing })
    }

    pub fn set_ec(&mut self, std_parallel_1: f64, std_parallel_2: f64, center_lat: f64, center_long: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::EquidistantConic { std_parallel_1, std_parallel_2, center_lat, center_long, false_easting, false_northing })
    }

    pub fn set_equirectangular(&mut self, center_lat: f64, central_meridian: f64, std_parallel_1: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::Equirectangular { center_lat, central_meridian, std_parallel_1, false_easting, false_northing })
    }

    pub fn set_gs(&mut self, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::GallStereographic { central_meridian, false_easting, false_northing })
    }

    pub fn set_gauss_schreiber_tm(&mut self, center_lat: f64, central_meridian: f64, scale: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::GaussSchreiberTransverseMercator { center_lat, central_meridian, scale, false_easting, false_northing })
    }

    pub fn set_geos(&mut self, central_meridian: f64, satellite_height: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::GeostationarySatellite { central_meridian, satellite_height, false_easting, false_northing })
    }

    pub fn set_gnomonic(&mut self, center_lat: f64, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::Gnomonic { center_lat, central_meridian, false_easting, false_northing })
    }

    pub fn set_goode_homolosine(&mut self, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::GoodeHomolosine { central_meridian, false_easting, false_northing })
    }

    pub fn set_hom(&mut self, center_lat: f64, center_long: f64, azimuth: f64, rectified_grid_angle: f64, scale: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::HotineObliqueMercator { center_lat, center_long, azimuth, rectified_grid_angle, scale, false_easting, false_northing })
    }

    pub fn set_hom_azimuth_center(&mut self, center_lat: f64, center_long: f64, azimuth: f64, rectified_grid_angle: f64, scale: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::HotineObliqueMercatorAzimuthCenter { center_lat, center_long, azimuth, rectified_grid_angle, scale, false_easting, false_northing })
    }

    pub fn set_hom_2pno(&mut self, center_lat: f64, lat_point_1: f64, long_point_1: f64, lat_point_2: f64, long_point_2: f64, scale: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::HotineObliqueMercatorTwoPoint { center_lat, lat_point_1, long_point_1, lat_point_2, long_point_2, scale, false_easting, false_northing })
    }

    pub fn set_iwm_polyconic(&mut self, central_meridian: f64, std_parallel_1: f64, std_parallel_2: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::InternationalMapWorldPolyconic { central_meridian, std_parallel_1, std_parallel_2, false_easting, false_northing })
    }

    pub fn set_krovak(&mut self, center_lat: f64, center_long: f64, azimuth: f64, pseudo_std_parallel_1: f64, scale: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::Krovak { center_lat, center_long, azimuth, pseudo_std_parallel_1, scale, false_easting, false_northing })
    }

    pub fn set_laea(&mut self, center_lat: f64, center_long: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::LambertAzimuthalEqualArea { center_lat, center_long, false_easting, false_northing })
    }

    pub fn set_lcc(&mut self, std_parallel_1: f64, std_parallel_2: f64, center_lat: f64, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::LambertConformalConic2SP { std_parallel_1, std_parallel_2, center_lat, central_meridian, false_easting, false_northing })
    }

    pub fn set_lcc_1sp(&mut self, center_lat: f64, central_meridian: f64, scale: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::LambertConformalConic1SP { center_lat, central_meridian, scale, false_easting, false_northing })
    }

    pub fn set_lccb(&mut self, std_parallel_1: f64, std_parallel_2: f64, center_lat: f64, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::LambertConformalConic2SPBelgium { std_parallel_1, std_parallel_2, center_lat, central_meridian, false_easting, false_northing })
    }

    pub fn set_mercator(&mut self, center_lat: f64, central_meridian: f64, scale: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::Mercator1SP { center_lat, central_meridian, scale, false_easting, false_northing })
    }

    pub fn set_mercator_2sp(&mut self, std_parallel_1: f64, center_lat: f64, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::Mercator2SP { std_parallel_1, center_lat, central_meridian, false_easting, false_northing })
    }

    pub fn set_mc(&mut self, center_lat: f64, center_long: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::MillerCylindrical { center_lat, center_long, false_easting, false_northing })
    }

    pub fn set_mollweide(&mut self, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::Mollweide { central_meridian, false_easting, false_northing })
    }

    pub fn set_nzmg(&mut self, center_lat: f64, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::NewZealandMapGrid { center_lat, central_meridian, false_easting, false_northing })
    }

    pub fn set_os(&mut self, center_lat: f64, central_meridian: f64, scale: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::ObliqueStereographic { center_lat, central_meridian, scale, false_easting, false_northing })
    }

    pub fn set_orthographic(&mut self, center_lat: f64, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::Orthographic { center_lat, central_meridian, false_easting, false_northing })
    }

    pub fn set_ps(&mut self, center_lat: f64, central_meridian: f64, scale: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::PolarStereographic { center_lat, central_meridian, scale, false_easting, false_northing })
    }

    pub fn set_polyconic(&mut self, center_lat: f64, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::Polyconic { center_lat, central_meridian, false_easting, false_northing })
    }

    pub fn set_robinson(&mut self, center_long: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::Robinson { center_long, false_easting, false_northing })
    }

    pub fn set_sinusoidal(&mut self, center_long: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::Sinusoidal { center_long, false_easting, false_northing })
    }

    pub fn set_stereographic(&mut self, center_lat: f64, central_meridian: f64, scale: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::Stereographic { center_lat, central_meridian, scale, false_easting, false_northing })
    }

    pub fn set_soc(&mut self, center_lat: f64, center_long: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::SwissObliqueCylindrical { center_lat, center_long, false_easting, false_northing })
    }

    pub fn set_tm(&mut self, center_lat: f64, central_meridian: f64, scale: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::TransverseMercator { center_lat, central_meridian, scale, false_easting, false_northing })
    }

    pub fn set_tmso(&mut self, center_lat: f64, central_meridian: f64, scale: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::TransverseMercatorSouthOriented { center_lat, central_meridian, scale, false_easting, false_northing })
    }

    pub fn set_tped(&mut self, lat_point_1: f64, long_point_1: f64, lat_point_2: f64, long_point_2: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::TwoPointEquidistant { lat_point_1, long_point_1, lat_point_2, long_point_2, false_easting, false_northing })
    }

    pub fn set_vdg(&mut self, central_meridian: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        self.set_projection(&Projection::VanDerGrinten { central_meridian, false_easting, false_northing })
    }

    /// Wagner I to VII; only variant III uses the latitude of origin
    pub fn set_wagner(&mut self, variation: u8, center_lat: f64, false_easting: f64, false_northing: f64) -> SrsResult<()> {
        let projection = match variation {
            1 => Projection::WagnerI { false_easting, false_northing },
            2 => Projection::WagnerII { false_easting, false_northing },
            3 => Projection::WagnerIII { center_lat, false_easting, false_northing },
            4 => Projection::WagnerIV { false_easting, false_northing },
            5 => Projection::WagnerV { false_easting, false_northing },
            6 => Projection::WagnerVI { false_easting, false_northing },
            7 => Projection::WagnerVII { false_easting, false_northing },
            _ => {
                return Err(crate::srs::errors::SrsError::UnsupportedFormat(format!(
                    "Wagner variation {} does not exist", variation
                )));
            },
        };
        self.set_projection(&projection)
    }
}
