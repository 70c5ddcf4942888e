//! Codec implementation for ordered maps.
//!
//! A map is a list of `[key, value]` pair lists in ascending key order. Since [BTreeMap]
//! iterates in key order the encoding is unique, and a decoder rejects keys that are out of
//! order or repeated.

use crate::{
    header::{Header, Kind},
    record::{finish, read_element},
    Bounded, EncodeSize, Error, Kinded, RangeCfg, Read, Write,
};
use bytes::{Buf, BufMut};
use std::collections::BTreeMap;
use tracing::debug;

fn pair_payload<K: EncodeSize, V: EncodeSize>(key: &K, value: &V) -> usize {
    key.encode_size() + value.encode_size()
}

fn payload_size<K: EncodeSize, V: EncodeSize>(map: &BTreeMap<K, V>) -> usize {
    map.iter()
        .map(|(k, v)| {
            let pair = pair_payload(k, v);
            Header::list(pair).encode_size() + pair
        })
        .sum()
}

impl<K, V> Kinded for BTreeMap<K, V> {
    const KIND: Kind = Kind::List;
}

impl<K: Write + EncodeSize, V: Write + EncodeSize> Write for BTreeMap<K, V> {
    fn write(&self, buf: &mut impl BufMut) {
        Header::list(payload_size(self)).write(buf);
        for (k, v) in self {
            Header::list(pair_payload(k, v)).write(buf);
            k.write(buf);
            v.write(buf);
        }
    }
}

impl<K: EncodeSize, V: EncodeSize> EncodeSize for BTreeMap<K, V> {
    fn encode_size(&self) -> usize {
        let payload = payload_size(self);
        Header::list(payload).encode_size() + payload
    }
}

impl<K: Read + Ord, V: Read> Read for BTreeMap<K, V> {
    type Cfg = (RangeCfg, (K::Cfg, V::Cfg));

    fn read_cfg(buf: &mut impl Buf, (range, (k_cfg, v_cfg)): &Self::Cfg) -> Result<Self, Error> {
        let mut body = Bounded::list(buf)?;
        let mut map = BTreeMap::new();
        while !body.is_exhausted() {
            let mut pair = Bounded::list(&mut body)?;
            let key = read_element::<K>(&mut pair, k_cfg, "key")?;
            let value = read_element::<V>(&mut pair, v_cfg, "value")?;
            finish(&pair, "map entry")?;

            if let Some((last, _)) = map.last_key_value() {
                if key <= *last {
                    debug!(entry = map.len(), "map keys out of order");
                    return Err(Error::InvalidData("BTreeMap", "keys must be strictly ascending"));
                }
            }
            map.insert(key, value);
        }
        if !range.contains(map.len()) {
            return Err(Error::InvalidLength(map.len()));
        }
        Ok(map)
    }
}
