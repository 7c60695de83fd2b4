//! Static lookup tables used by the dashboard session.
//!
//! These are configuration data, not computed values: the satellite-tag to
//! platform-id mapping, the friendly display names for known products, and
//! the per-coverage fallback attribute lists that compensate for WTSS
//! detail responses omitting their attribute arrays.

/// Satellite names offered by the tag-filter suggestion box.
pub const SATELLITE_SUGGESTIONS: &[&str] = &[
    "CBERS4A",
    "Landsat-2",
    "CBERS-2B",
    "GOES-19",
    "Sentinel-2",
    "Sentinel-1",
    "MODIS Terra/Aqua",
    "Landsat series",
    "MODIS Aqua",
    "Sentinel-3 OLCI",
    "CBERS-4",
    "Estações meteorológicas / satélite",
    "CBERS WFI",
];

/// Map a user-facing satellite tag to the normalized platform id used as
/// a product filter. Unknown tags have no platform id and are skipped.
pub fn platform_id_for_tag(tag: &str) -> Option<&'static str> {
    match tag {
        "CBERS4A" => Some("cbers4a"),
        "CBERS-4" => Some("cbers4"),
        "Landsat-2" => Some("landsat-2"),
        "Landsat series" => Some("landsat-2"),
        "Sentinel-2" => Some("sentinel2"),
        "Sentinel-1" => Some("sentinel1"),
        "MODIS Terra/Aqua" => Some("modis"),
        "GOES-19" => Some("goes16"),
        "MODIS Aqua" => Some("modis"),
        "Sentinel-3 OLCI" => Some("sentinel3"),
        "CBERS-2B" => Some("cbers2b"),
        "Estações meteorológicas / satélite" => Some("EtaCCDay_CMIP5-1"),
        "CBERS WFI" => Some("amazonia1"),
        _ => None,
    }
}

/// Popular display name for a product, falling back to the product name
/// itself when no mapping exists.
pub fn friendly_name_for(product_name: &str) -> &str {
    match product_name {
        "mosaic-cbers4a-paraiba-3m-1" => "CBERS-4A (Paraíba)",
        "mosaic-cbers4-paraiba-3m-1" => "CBERS-4 (Paraíba)",
        "AMZ1-WFI-L4-SR-1" => "Amazônia-1 (WFI)",
        "LCC_L8_30_16D_STK_Cerrado-1" => "Landsat-8 (Cerrado 16D)",
        "myd13q1-6.1" => "MODIS (NDVI/EVI 16D)",
        "mosaic-s2-yanomami_territory-6m-1" => "Sentinel-2 (Yanomami 6M)",
        "LANDSAT-16D-1" => "Landsat (Data Cube 16D)",
        "S2-16D-2" => "Sentinel-2 (Data Cube 16D)",
        "prec_merge_daily-1" => "Precipitação Diária",
        "EtaCCDay_CMIP5-1" => "Modelo Climático (CMIP5)",
        other => other,
    }
}

/// Fallback attribute lists for coverages whose WTSS detail endpoint
/// returns an empty attribute array. Coverages absent from this table and
/// from the remote detail are dropped from the usable set.
pub fn fallback_attributes(coverage: &str) -> Option<&'static [&'static str]> {
    match coverage {
        "CBERS4-MUX-2M-1" => Some(&[
            "NDVI",
            "EVI",
            "BAND5",
            "BAND6",
            "BAND7",
            "BAND8",
            "CMASK",
            "CLEAROB",
            "TOTALOB",
            "PROVENANCE",
        ]),
        "CBERS4-WFI-16D-2" => Some(&[
            "NDVI",
            "EVI",
            "BAND13",
            "BAND14",
            "BAND15",
            "BAND16",
            "CMASK",
            "CLEAROB",
            "TOTALOB",
            "PROVENANCE",
            "DATASOURCE",
        ]),
        "CBERS-WFI-8D-1" => Some(&[
            "NDVI",
            "EVI",
            "BAND13",
            "BAND14",
            "BAND15",
            "BAND16",
            "CMASK",
            "CLEAROB",
            "TOTALOB",
            "PROVENANCE",
            "DATASOURCE",
        ]),
        "LANDSAT-16D-1" => Some(&[
            "NDVI",
            "EVI",
            "blue",
            "green",
            "red",
            "nir08",
            "swir16",
            "swir22",
            "coastal",
            "qa_pixel",
            "CLEAROB",
            "TOTALOB",
            "PROVENANCE",
            "DATASOURCE",
        ]),
        "mod11a2-6.1" => Some(&[
            "LST_Day_1km",
            "QC_Day",
            "Day_view_time",
            "Day_view_angl",
            "Clear_sky_days",
            "LST_Night_1km",
            "QC_Night",
            "Night_view_time",
            "Night_view_angl",
            "Emis_31",
            "Clear_sky_nights",
            "Emis_32",
        ]),
        "mod13q1-6.1" => Some(&[
            "NDVI",
            "EVI",
            "VI_Quality",
            "composite_day_of_the_year",
            "pixel_reliability",
            "blue_reflectance",
            "red_reflectance",
            "NIR_reflectance",
            "MIR_reflectance",
            "view_zenith_angle",
            "sun_zenith_angle",
            "relative_azimuth_angle",
        ]),
        "myd11a2-6.1" => Some(&[
            "LST_Day_1km",
            "QC_Day",
            "Day_view_time",
            "Day_view_angl",
            "LST_Night_1km",
            "QC_Night",
            "Night_view_time",
            "Night_view_angl",
            "Emis_31",
            "Emis_32",
            "Clear_sky_days",
            "Clear_sky_nights",
        ]),
        "myd13q1-6.1" => Some(&[
            "NDVI",
            "EVI",
            "blue_reflectance",
            "red_reflectance",
            "NIR_reflectance",
            "VI_Quality",
            "view_zenith_angle",
            "composite_day_of_the_year",
            "pixel_reliability",
            "MIR_reflectance",
            "sun_zenith_angle",
            "relative_azimuth_angle",
        ]),
        "S2-16D-2" => Some(&[
            "CLEAROB",
            "TOTALOB",
            "PROVENANCE",
            "SCL",
            "B01",
            "B02",
            "B04",
            "B08",
            "B8A",
            "B09",
            "B03",
            "B11",
            "B12",
            "EVI",
            "NDVI",
            "NBR",
            "B05",
            "B06",
            "B07",
        ]),
        _ => None,
    }
}
