use bitcoin::Network;

/// Calendar years a wallet restore may start scanning from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum BlockChainYear {
    Year2009 = 2009,
    Year2010,
    Year2011,
    Year2012,
    Year2013,
    Year2014,
    Year2015,
    Year2016,
    Year2017,
    Year2018,
    Year2019,
    Year2020,
    Year2021,
    Year2022,
}

impl BlockChainYear {
    pub const ALL: [BlockChainYear; 14] = [
        BlockChainYear::Year2009,
        BlockChainYear::Year2010,
        BlockChainYear::Year2011,
        BlockChainYear::Year2012,
        BlockChainYear::Year2013,
        BlockChainYear::Year2014,
        BlockChainYear::Year2015,
        BlockChainYear::Year2016,
        BlockChainYear::Year2017,
        BlockChainYear::Year2018,
        BlockChainYear::Year2019,
        BlockChainYear::Year2020,
        BlockChainYear::Year2021,
        BlockChainYear::Year2022,
    ];

    pub fn year(self) -> u16 {
        self as u16
    }
}

/// First block height of each selectable year on one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectableYears {
    heights: &'static [(BlockChainYear, u32)],
}

const MAIN_HEIGHTS: &[(BlockChainYear, u32)] = &[
    (BlockChainYear::Year2015, 336_861),
    (BlockChainYear::Year2016, 391_182),
    (BlockChainYear::Year2017, 446_033),
    (BlockChainYear::Year2018, 501_961),
    (BlockChainYear::Year2019, 556_459),
    (BlockChainYear::Year2020, 610_691),
    (BlockChainYear::Year2021, 663_913),
    (BlockChainYear::Year2022, 716_599),
];

const TESTNET_HEIGHTS: &[(BlockChainYear, u32)] = &[
    (BlockChainYear::Year2012, 514),
    (BlockChainYear::Year2013, 46_016),
    (BlockChainYear::Year2014, 154_932),
    (BlockChainYear::Year2015, 316_147),
    (BlockChainYear::Year2016, 629_827),
    (BlockChainYear::Year2017, 1_063_226),
    (BlockChainYear::Year2018, 1_256_955),
    (BlockChainYear::Year2019, 1_450_356),
    (BlockChainYear::Year2020, 1_637_224),
    (BlockChainYear::Year2021, 1_901_675),
    (BlockChainYear::Year2022, 2_133_952),
];

impl SelectableYears {
    pub fn main() -> Self {
        Self {
            heights: MAIN_HEIGHTS,
        }
    }

    pub fn testnet() -> Self {
        Self {
            heights: TESTNET_HEIGHTS,
        }
    }

    /// Table for a `bitcoin` crate network; `None` when no table exists.
    pub fn for_network(network: Network) -> Option<Self> {
        match network {
            Network::Bitcoin => Some(Self::main()),
            Network::Testnet => Some(Self::testnet()),
            _ => None,
        }
    }

    /// Years with a known height, ascending.
    pub fn years(&self) -> Vec<BlockChainYear> {
        self.heights.iter().map(|(year, _)| *year).collect()
    }

    pub fn height(&self, year: BlockChainYear) -> Option<u32> {
        self.heights
            .iter()
            .find(|(known, _)| *known == year)
            .map(|(_, height)| *height)
    }
}
